//! Connection parameters and environment loading.
//!
//! Two environment forms are supported, matching the NVR tooling convention:
//!
//! A single combined variable:
//!
//! ```text
//! UVC="http://192.168.1.1:7080/?apiKey=XXXXXXXX"
//! ```
//!
//! or individual ones:
//!
//! ```text
//! UVC_HOST=192.168.1.1
//! UVC_PORT=7080
//! UVC_APIKEY=XXXXXXXX
//! ```
//!
//! The port defaults to 7080 in both forms. The loader does not check the
//! base path; [`UvcClient::new`](crate::UvcClient::new) rejects anything
//! other than `/`.

use crate::error::{Result, UvcError};
use std::env;
use url::Url;

/// Default NVR management port.
pub const DEFAULT_PORT: u16 = 7080;

/// Immutable connection parameters for a [`UvcClient`](crate::UvcClient).
#[derive(Debug, Clone)]
pub struct NvrConfig {
    /// NVR hostname or IP address.
    pub host: String,
    /// NVR management port.
    pub port: u16,
    /// Static API key, sent as the `apiKey` query parameter on every request.
    pub apikey: String,
    /// Base path. Only `/` is supported.
    pub path: String,
}

impl NvrConfig {
    /// Build a config with the default port and root path.
    pub fn new(host: impl Into<String>, apikey: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            apikey: apikey.into(),
            path: "/".to_owned(),
        }
    }

    /// Override the management port.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Load connection parameters from the process environment.
    ///
    /// Prefers the combined `UVC` variable; falls back to `UVC_HOST`,
    /// `UVC_PORT`, and `UVC_APIKEY`.
    ///
    /// # Errors
    ///
    /// [`UvcError::Config`] if neither form yields a host and API key, or
    /// if `UVC` / `UVC_PORT` cannot be parsed.
    pub fn from_env() -> Result<Self> {
        if let Ok(combined) = env::var("UVC") {
            return Self::from_combined(&combined);
        }
        Self::from_discrete(
            env::var("UVC_HOST").ok(),
            env::var("UVC_PORT").ok(),
            env::var("UVC_APIKEY").ok(),
        )
    }

    /// Parse the combined URL form, e.g. `http://10.0.0.5:7080/?apiKey=KEY`.
    ///
    /// The URL path is carried over as-is; its validity is checked at
    /// client construction, not here.
    pub fn from_combined(combined: &str) -> Result<Self> {
        let url = Url::parse(combined)
            .map_err(|e| UvcError::Config(format!("invalid UVC URL `{combined}': {e}")))?;
        let host = url
            .host_str()
            .ok_or_else(|| UvcError::Config(format!("UVC URL `{combined}' has no host")))?
            .to_owned();
        let port = match url.port() {
            Some(p) => p,
            // The parser drops an explicit port equal to the scheme default
            // (`:80` on http), so recover it from the authority text. Only a
            // truly absent port segment falls back to 7080.
            None => match explicit_port(combined) {
                Some(p) => p.parse().map_err(|_| {
                    UvcError::Config(format!("invalid port in UVC URL `{combined}'"))
                })?,
                None => DEFAULT_PORT,
            },
        };
        let apikey = url
            .query_pairs()
            .find(|(k, _)| k == "apiKey")
            .map(|(_, v)| v.into_owned())
            .ok_or_else(|| UvcError::Config("UVC URL has no apiKey query parameter".to_owned()))?;
        Ok(Self {
            host,
            port,
            apikey,
            path: url.path().to_owned(),
        })
    }

    fn from_discrete(
        host: Option<String>,
        port: Option<String>,
        apikey: Option<String>,
    ) -> Result<Self> {
        let host = host.ok_or_else(|| UvcError::Config("UVC_HOST is not set".to_owned()))?;
        let port = match port {
            Some(p) => p
                .parse()
                .map_err(|_| UvcError::Config(format!("invalid UVC_PORT `{p}'")))?,
            None => DEFAULT_PORT,
        };
        let apikey = apikey.ok_or_else(|| UvcError::Config("UVC_APIKEY is not set".to_owned()))?;
        Ok(Self {
            host,
            port,
            apikey,
            path: "/".to_owned(),
        })
    }
}

/// Explicit port text in a URL's authority, if any.
fn explicit_port(combined: &str) -> Option<&str> {
    let rest = combined
        .split_once("://")
        .map_or(combined, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
    if host_port.ends_with(']') {
        // Bracketed IPv6 literal with no port.
        return None;
    }
    host_port.rsplit_once(':').map(|(_, port)| port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_url_with_port() {
        let cfg = NvrConfig::from_combined("http://10.0.0.5:8080/?apiKey=ABC123").unwrap();
        assert_eq!(cfg.host, "10.0.0.5");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.apikey, "ABC123");
        assert_eq!(cfg.path, "/");
    }

    #[test]
    fn combined_url_defaults_port() {
        let cfg = NvrConfig::from_combined("http://10.0.0.5/?apiKey=ABC123").unwrap();
        assert_eq!(cfg.host, "10.0.0.5");
        assert_eq!(cfg.port, DEFAULT_PORT);
    }

    #[test]
    fn combined_url_keeps_explicit_scheme_default_port() {
        // The URL parser normalizes `:80` away on http; it must still win
        // over the 7080 fallback.
        let cfg = NvrConfig::from_combined("http://10.0.0.5:80/?apiKey=K").unwrap();
        assert_eq!(cfg.port, 80);

        let cfg = NvrConfig::from_combined("https://10.0.0.5:443/?apiKey=K").unwrap();
        assert_eq!(cfg.port, 443);
    }

    #[test]
    fn explicit_port_reads_the_authority_only() {
        assert_eq!(explicit_port("http://10.0.0.5:80/?apiKey=K"), Some("80"));
        assert_eq!(explicit_port("http://10.0.0.5/?apiKey=K:1"), None);
        assert_eq!(explicit_port("http://user@10.0.0.5:80/"), Some("80"));
        assert_eq!(explicit_port("http://[::1]/?apiKey=K"), None);
        assert_eq!(explicit_port("http://[::1]:80/?apiKey=K"), Some("80"));
    }

    #[test]
    fn combined_url_without_apikey_is_an_error() {
        let err = NvrConfig::from_combined("http://10.0.0.5:7080/").unwrap_err();
        assert!(matches!(err, UvcError::Config(_)));
    }

    #[test]
    fn combined_url_passes_path_through() {
        let cfg = NvrConfig::from_combined("http://nvr.local/video/?apiKey=K").unwrap();
        assert_eq!(cfg.path, "/video/");
    }

    #[test]
    fn discrete_vars_default_port_and_path() {
        let cfg =
            NvrConfig::from_discrete(Some("nvr.local".into()), None, Some("SECRET".into()))
                .unwrap();
        assert_eq!(cfg.host, "nvr.local");
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.apikey, "SECRET");
        assert_eq!(cfg.path, "/");
    }

    #[test]
    fn discrete_vars_require_host_and_key() {
        assert!(matches!(
            NvrConfig::from_discrete(None, None, Some("K".into())).unwrap_err(),
            UvcError::Config(_)
        ));
        assert!(matches!(
            NvrConfig::from_discrete(Some("h".into()), None, None).unwrap_err(),
            UvcError::Config(_)
        ));
    }

    #[test]
    fn discrete_vars_reject_bad_port() {
        let err = NvrConfig::from_discrete(
            Some("h".into()),
            Some("video".into()),
            Some("K".into()),
        )
        .unwrap_err();
        assert!(matches!(err, UvcError::Config(_)));
    }

    #[test]
    fn builder_sets_port() {
        let cfg = NvrConfig::new("10.0.0.5", "K").port(9090);
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.path, "/");
    }
}
