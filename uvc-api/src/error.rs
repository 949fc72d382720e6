//! Error types for the UniFi Video NVR API client.

use thiserror::Error;

/// Errors that can occur when interacting with the NVR.
#[derive(Debug, Error)]
pub enum UvcError {
    /// HTTP transport error (connection refused, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The NVR answered with a non-2xx status.
    ///
    /// Use [`is_not_found`](UvcError::is_not_found) to tell a missing
    /// camera apart from a server-side failure.
    #[error("NVR returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, for diagnostics.
        body: String,
    },

    /// Invalid connection parameters (unsupported base path, missing
    /// API key, malformed `UVC` environment variable).
    #[error("configuration error: {0}")]
    Config(String),

    /// Recording mode string outside `none` / `full` / `motion`.
    #[error("unknown recording mode `{0}'")]
    UnknownMode(String),

    /// Channel name outside `high` / `medium` / `low`.
    #[error("unknown channel `{0}'")]
    UnknownChannel(String),

    /// Picture-setting key not present on the server-side record.
    #[error("unknown picture setting `{0}'")]
    UnknownSetting(String),

    /// Picture-setting value could not be coerced to the type the
    /// server currently stores for that key.
    #[error("setting `{key}' requires {expected} not {given}")]
    SettingType {
        /// Offending settings key.
        key: String,
        /// Type the server stores for this key.
        expected: &'static str,
        /// Type the caller supplied.
        given: &'static str,
    },

    /// Failed to parse JSON from the NVR.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while decompressing a gzip response body.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Response did not match the expected envelope (e.g. empty `data`).
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl UvcError {
    /// True if this is a 404 from the NVR (camera does not exist).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Convenience alias for `Result<T, UvcError>`.
pub type Result<T> = std::result::Result<T, UvcError>;
