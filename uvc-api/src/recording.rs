//! Recording mode control.
//!
//! Endpoints: `GET` + `PUT /api/2.0/camera/{uuid}`
//!
//! The recording policy lives in `data[0].recordingSettings`:
//! ```json
//! {
//!   "fullTimeRecordEnabled": false,
//!   "motionRecordEnabled": true,
//!   "channel": 0,
//!   ...
//! }
//! ```
//!
//! There is no settings-only endpoint; the whole camera record is fetched,
//! modified, and PUT back.

use crate::client::UvcClient;
use crate::error::Result;
use crate::types::{Channel, RecordMode, RecordingSettings};

impl UvcClient {
    /// Set the recording mode for a camera.
    ///
    /// Fetches the camera record, flips the two recording flags per `mode`,
    /// optionally selects the recording `channel`, and PUTs the record back.
    ///
    /// Returns `true` iff the settings the NVR echoes in the PUT response
    /// equal the settings that were sent. A `false` return means the NVR
    /// accepted the write but applied different values.
    pub fn set_recordmode(
        &self,
        uuid: &str,
        mode: RecordMode,
        chan: Option<Channel>,
    ) -> Result<bool> {
        let mut record = self.fetch_camera(uuid)?;
        apply_mode(&mut record.recording_settings, mode, chan);
        let sent = record.recording_settings.clone();
        let updated = self.put_camera(uuid, &record)?;
        Ok(updated.recording_settings == sent)
    }
}

fn apply_mode(settings: &mut RecordingSettings, mode: RecordMode, chan: Option<Channel>) {
    let (full_time, motion) = mode.flags();
    settings.full_time_record_enabled = full_time;
    settings.motion_record_enabled = motion;
    if let Some(chan) = chan {
        settings.channel = Some(chan.index());
    }
}
