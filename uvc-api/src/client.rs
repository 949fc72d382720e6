//! HTTP client for the UniFi Video NVR management API.
//!
//! Every request carries the API key as an `apiKey` query parameter and
//! advertises gzip acceptance; the NVR may answer with a gzip-compressed
//! body, signaled by the `Content-Encoding` response header. Responses are
//! JSON in the `{ "data": [...] }` envelope.
//!
//! Transport is plaintext HTTP/1.1, one fresh connection per call (the NVR
//! management port does not speak TLS and connection reuse is disabled).

use crate::config::NvrConfig;
use crate::error::{Result, UvcError};
use crate::types::{CameraRecord, Envelope};
use flate2::read::GzDecoder;
use log::debug;
use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_TYPE};
use serde_json::Value;
use std::fmt;
use std::io::Read;
use std::time::Duration;

const ACCEPT_VALUE: &str = "application/json, text/javascript, */*; q=0.01";
const ACCEPT_ENCODING_VALUE: &str = "gzip, deflate";

/// Blocking client for a UniFi Video NVR.
///
/// Holds a [`reqwest::blocking::Client`] and the immutable [`NvrConfig`].
/// API methods are implemented in separate modules (`camera`, `recording`,
/// `picture`) as `impl UvcClient` blocks.
pub struct UvcClient {
    http: Client,
    config: NvrConfig,
    base_url: String,
    scope: String,
}

// The API key is a secret; keep it out of debug output.
impl fmt::Debug for UvcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UvcClient")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .finish_non_exhaustive()
    }
}

impl UvcClient {
    /// Create a client for the given connection parameters.
    ///
    /// # Errors
    ///
    /// [`UvcError::Config`] if the base path is not `/` (the only path
    /// this version supports), or if the HTTP client cannot be built.
    pub fn new(config: NvrConfig) -> Result<Self> {
        if config.path != "/" {
            return Err(UvcError::Config(format!(
                "base path `{}' not supported yet",
                config.path
            )));
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(0)
            .build()?;
        let base_url = format!("http://{}:{}", config.host, config.port);
        let scope = format!("UVC({}:{})", config.host, config.port);
        Ok(Self {
            http,
            config,
            base_url,
            scope,
        })
    }

    /// Create a client from the `UVC` / `UVC_HOST` / `UVC_PORT` /
    /// `UVC_APIKEY` environment variables. See [`NvrConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(NvrConfig::from_env()?)
    }

    /// Return a reference to the connection parameters.
    pub fn config(&self) -> &NvrConfig {
        &self.config
    }

    /// Send one request to the NVR and decode the JSON response.
    ///
    /// `path` is relative to the host, e.g. `/api/2.0/camera`. The API key
    /// is appended to the query string and the body, if any, is sent as
    /// `application/json`.
    ///
    /// # Errors
    ///
    /// [`UvcError::Status`] on any non-2xx answer, carrying the status code
    /// and raw body.
    pub(crate) fn request(&self, path: &str, method: Method, body: Option<String>) -> Result<Value> {
        let url = format!(
            "{}{}",
            self.base_url,
            with_apikey(path, &self.config.apikey)
        );
        debug!("[{}] {} {}", self.scope, method, path);

        let mut req = self
            .http
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, ACCEPT_VALUE)
            .header(ACCEPT_ENCODING, ACCEPT_ENCODING_VALUE);
        if let Some(body) = body {
            req = req.body(body);
        }

        let resp = req.send()?;
        let status = resp.status();
        debug!("[{}] {} {} -> {}", self.scope, method, path, status);

        // HeaderMap lookups are case-insensitive on the name.
        let gzipped = resp
            .headers()
            .get(CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.eq_ignore_ascii_case("gzip"));

        let bytes = resp.bytes()?;
        if !status.is_success() {
            return Err(UvcError::Status {
                status: status.as_u16(),
                body: body_text(&bytes, gzipped),
            });
        }

        decode_body(&bytes, gzipped)
    }

    /// Fetch the full record for one camera (`data[0]` of the envelope).
    pub(crate) fn fetch_camera(&self, uuid: &str) -> Result<CameraRecord> {
        let resp = self.request(&camera_path(uuid), Method::GET, None)?;
        first_record(resp, uuid)
    }

    /// PUT a full camera record back and return the record the NVR echoes.
    pub(crate) fn put_camera(&self, uuid: &str, record: &CameraRecord) -> Result<CameraRecord> {
        let body = serde_json::to_string(record)?;
        let resp = self.request(&camera_path(uuid), Method::PUT, Some(body))?;
        first_record(resp, uuid)
    }
}

/// Path of the camera index endpoint.
pub(crate) const CAMERA_INDEX_PATH: &str = "/api/2.0/camera";

/// Path of a single camera's endpoint.
pub(crate) fn camera_path(uuid: &str) -> String {
    format!("{CAMERA_INDEX_PATH}/{uuid}")
}

/// Append the API key to a request path, respecting an existing query string.
fn with_apikey(path: &str, apikey: &str) -> String {
    let sep = if path.contains('?') { '&' } else { '?' };
    format!("{path}{sep}apiKey={}", urlencoding::encode(apikey))
}

/// Decode a response body, gunzipping first when the server says so.
fn decode_body(data: &[u8], gzipped: bool) -> Result<Value> {
    if gzipped {
        let mut plain = Vec::new();
        GzDecoder::new(data).read_to_end(&mut plain)?;
        Ok(serde_json::from_slice(&plain)?)
    } else {
        Ok(serde_json::from_slice(data)?)
    }
}

/// Best-effort text of a response body, for error diagnostics.
///
/// Gunzips when the server said the body is compressed, falling back to the
/// raw bytes if decompression fails.
fn body_text(data: &[u8], gzipped: bool) -> String {
    if gzipped {
        let mut plain = Vec::new();
        if GzDecoder::new(data).read_to_end(&mut plain).is_ok() {
            return String::from_utf8_lossy(&plain).into_owned();
        }
    }
    String::from_utf8_lossy(data).into_owned()
}

fn first_record(resp: Value, uuid: &str) -> Result<CameraRecord> {
    let envelope: Envelope<CameraRecord> = serde_json::from_value(resp)?;
    envelope
        .data
        .into_iter()
        .next()
        .ok_or_else(|| UvcError::UnexpectedResponse(format!("no data for camera {uuid}")))
}
