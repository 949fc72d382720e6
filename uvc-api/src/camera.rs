//! Camera index and lookup.
//!
//! Endpoint: `GET /api/2.0/camera`
//!
//! Response JSON (abridged):
//! ```json
//! {
//!   "data": [
//!     { "name": "porch", "uuid": "abc-123", "state": "CONNECTED",
//!       "managed": true, ... },
//!     ...
//!   ]
//! }
//! ```

use crate::client::{CAMERA_INDEX_PATH, UvcClient, camera_path};
use crate::error::Result;
use crate::types::{CameraSummary, Envelope};
use reqwest::Method;
use std::collections::HashMap;

impl UvcClient {
    /// Return an index of available cameras, in server order.
    pub fn index(&self) -> Result<Vec<CameraSummary>> {
        let resp = self.request(CAMERA_INDEX_PATH, Method::GET, None)?;
        let envelope: Envelope<CameraSummary> = serde_json::from_value(resp)?;
        Ok(envelope.data)
    }

    /// Resolve a camera name to its UUID.
    ///
    /// When several cameras share a name, the one listed last in the index
    /// wins. Returns `None` if no camera has that name.
    pub fn name_to_uuid(&self, name: &str) -> Result<Option<String>> {
        Ok(uuid_for(self.index()?, name))
    }

    /// Dump the full record for a camera to stdout, pretty-printed.
    pub fn dump(&self, uuid: &str) -> Result<()> {
        let resp = self.request(&camera_path(uuid), Method::GET, None)?;
        println!("{}", serde_json::to_string_pretty(&resp)?);
        Ok(())
    }
}

fn uuid_for(cameras: Vec<CameraSummary>, name: &str) -> Option<String> {
    // Duplicate names collapse to the last index entry.
    let mut by_name: HashMap<String, String> =
        cameras.into_iter().map(|c| (c.name, c.uuid)).collect();
    by_name.remove(name)
}
