//! Data types for UniFi Video NVR API responses.
//!
//! The NVR wraps every response in an envelope with a top-level `data`
//! array; per-camera fields live in `data[0]`. Known sub-objects are
//! typed, everything else round-trips through `#[serde(flatten)]` catch-all
//! maps so a fetched record can be PUT back unchanged.

use crate::error::UvcError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Response envelope shared by all NVR endpoints.
///
/// ```json
/// { "data": [ ...one object per camera... ] }
/// ```
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: Vec<T>,
}

/// One row of the camera index.
///
/// API JSON fields: `name`, `uuid`, `state` (e.g. `CONNECTED`,
/// `DISCONNECTED`), `managed`. All other per-camera fields are ignored here;
/// fetch the full [`CameraRecord`] for those.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSummary {
    /// Display name configured on the NVR.
    pub name: String,
    /// Camera UUID, the identifier used by all per-camera endpoints.
    pub uuid: String,
    /// Connection state string as reported by the NVR.
    pub state: String,
    /// Whether this NVR manages the camera.
    pub managed: bool,
}

/// Full camera record as returned by `GET /api/2.0/camera/{uuid}`.
///
/// Only the two settings sub-objects are typed; the remaining fields
/// (name, model, firmware, ...) are preserved verbatim in `extra` so the
/// whole record survives a fetch-modify-PUT round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRecord {
    /// Recording policy for this camera.
    #[serde(rename = "recordingSettings")]
    pub recording_settings: RecordingSettings,
    /// Image sensor processing (picture quality) settings. Key names are
    /// firmware-dependent and intentionally left untyped.
    #[serde(rename = "ispSettings")]
    pub isp_settings: Map<String, Value>,
    /// Everything else in the record, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Recording policy sub-object of a [`CameraRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingSettings {
    /// Record continuously.
    #[serde(rename = "fullTimeRecordEnabled")]
    pub full_time_record_enabled: bool,
    /// Record on motion detection.
    #[serde(rename = "motionRecordEnabled")]
    pub motion_record_enabled: bool,
    /// Zero-based recording channel index, see [`Channel`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<i64>,
    /// Remaining recording-settings fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Recording mode, mapped to the NVR's two boolean flags.
///
/// | Variant  | `fullTimeRecordEnabled` | `motionRecordEnabled` |
/// |----------|-------------------------|-----------------------|
/// | `None`   | false                   | false                 |
/// | `Full`   | true                    | false                 |
/// | `Motion` | false                   | true                  |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordMode {
    /// Never record.
    None,
    /// Record continuously.
    Full,
    /// Record on motion.
    Motion,
}

impl RecordMode {
    /// The `(fullTimeRecordEnabled, motionRecordEnabled)` flag pair.
    pub fn flags(self) -> (bool, bool) {
        match self {
            Self::None => (false, false),
            Self::Full => (true, false),
            Self::Motion => (false, true),
        }
    }
}

impl FromStr for RecordMode {
    type Err = UvcError;

    /// Parse a mode name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "full" => Ok(Self::Full),
            "motion" => Ok(Self::Motion),
            _ => Err(UvcError::UnknownMode(s.to_owned())),
        }
    }
}

/// Video quality tier, mapped to a zero-based channel index.
///
/// | Variant  | Index |
/// |----------|-------|
/// | `High`   | 0     |
/// | `Medium` | 1     |
/// | `Low`    | 2     |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    High,
    Medium,
    Low,
}

impl Channel {
    /// Zero-based index sent in `recordingSettings.channel`.
    pub fn index(self) -> i64 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

impl FromStr for Channel {
    type Err = UvcError;

    /// Parse a channel name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(UvcError::UnknownChannel(s.to_owned())),
        }
    }
}

/// A caller-supplied picture-setting value.
///
/// The NVR stores each ISP setting with a fixed scalar type; the caller's
/// value is coerced to match the stored type before the PUT (string `"44"`
/// converts to integer 44 for an integer key, and so on). See
/// [`UvcClient::set_picture_settings`](crate::UvcClient::set_picture_settings).
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
}

impl SettingValue {
    /// Human-readable type name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Text(_) => "string",
        }
    }

    pub(crate) fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(f) => Some(*f as i64),
            Self::Boolean(b) => Some(i64::from(*b)),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn as_float(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    pub(crate) fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Integer(i) => match i {
                0 => Some(false),
                1 => Some(true),
                _ => None,
            },
            Self::Boolean(b) => Some(*b),
            Self::Text(s) => match s.trim().to_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            Self::Float(_) => None,
        }
    }

    pub(crate) fn as_text(&self) -> String {
        match self {
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<i64> for SettingValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for SettingValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for SettingValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}
