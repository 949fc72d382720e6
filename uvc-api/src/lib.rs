//! Ubiquiti UniFi Video NVR management API client.
//!
//! Provides authenticated access to the NVR's REST API: camera listing,
//! recording-mode control, and picture (ISP) settings.
//!
//! # Authentication
//!
//! All API calls carry a static API key as an `apiKey` query parameter.
//! The key is configured on the NVR under the user's API access settings.
//! Connection parameters come from explicit [`NvrConfig`] values or from
//! the environment (`UVC` combined URL, or `UVC_HOST` / `UVC_PORT` /
//! `UVC_APIKEY`).
//!
//! ```no_run
//! use uvc_api::{NvrConfig, RecordMode, UvcClient};
//!
//! let client = UvcClient::new(NvrConfig::new("192.168.1.1", "XXXXXXXX"))?;
//! let uuid = client.name_to_uuid("porch")?.expect("no camera named porch");
//! client.set_recordmode(&uuid, RecordMode::Motion, None)?;
//! # Ok::<(), uvc_api::UvcError>(())
//! ```
//!
//! # API endpoint mapping
//!
//! | Method                                   | Endpoint                      | Description              |
//! |------------------------------------------|-------------------------------|--------------------------|
//! | [`UvcClient::index`]                     | `GET /api/2.0/camera`         | List cameras             |
//! | [`UvcClient::name_to_uuid`]              | (uses `index`)                | Resolve name to UUID     |
//! | [`UvcClient::dump`]                      | `GET /api/2.0/camera/{uuid}`  | Print raw camera record  |
//! | [`UvcClient::set_recordmode`]            | `GET`+`PUT /api/2.0/camera/{uuid}` | Change recording policy |
//! | [`UvcClient::get_picture_settings`]      | `GET /api/2.0/camera/{uuid}`  | Read ISP settings        |
//! | [`UvcClient::set_picture_settings`]      | `GET`+`PUT /api/2.0/camera/{uuid}` | Write ISP settings  |
//!
//! # Transport
//!
//! Blocking HTTP/1.1 over plaintext, one fresh connection per call. The NVR
//! may gzip response bodies; see [`client`](crate::client).

mod camera;
pub mod client;
pub mod config;
pub mod error;
mod picture;
mod recording;
pub mod types;

pub use client::UvcClient;
pub use config::NvrConfig;
pub use error::{Result, UvcError};
pub use types::{CameraRecord, CameraSummary, Channel, RecordMode, RecordingSettings, SettingValue};
