//! Client configuration.
//! Defaults mirror the stock backend deployment; each field can be overridden from the
//! environment (see `ClientConfig::from_env`) or set directly by the caller.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::error::{ClientError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_SESSION_FILE: &str = ".complaint-desk/session.json";
/// Evidence upload ceiling enforced by the backend (5 MiB).
pub const DEFAULT_MAX_UPLOAD: u64 = 5_242_880;
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const DEFAULT_NOTIFICATION_LIMIT: u32 = 20;
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin plus `/api` prefix; endpoints are appended verbatim.
    pub api_url: String,
    /// Where the file-backed session store keeps its state.
    pub session_file: PathBuf,
    pub max_upload_size: u64,
    /// Quiet period before a search term is sent.
    pub debounce: Duration,
    /// Rows requested per page by list views and list commands.
    pub page_limit: u32,
    pub notification_limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            max_upload_size: DEFAULT_MAX_UPLOAD,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            page_limit: DEFAULT_PAGE_LIMIT,
            notification_limit: DEFAULT_NOTIFICATION_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `COMPLAINT_DESK_*` environment variables. Unparseable
    /// numeric values fall back to the default.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = std::env::var("COMPLAINT_DESK_API_URL") { if !v.trim().is_empty() { cfg.api_url = v; } }
        if let Ok(v) = std::env::var("COMPLAINT_DESK_SESSION_FILE") { if !v.trim().is_empty() { cfg.session_file = PathBuf::from(v); } }
        cfg.max_upload_size = env_u64("COMPLAINT_DESK_MAX_UPLOAD").unwrap_or(cfg.max_upload_size);
        if let Some(ms) = env_u64("COMPLAINT_DESK_DEBOUNCE_MS") { cfg.debounce = Duration::from_millis(ms); }
        if let Some(n) = env_u64("COMPLAINT_DESK_PAGE_LIMIT").and_then(|n| u32::try_from(n).ok()).filter(|n| *n > 0) {
            cfg.page_limit = n;
        }
        cfg
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self { self.api_url = url.into(); self }
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self { self.session_file = path.into(); self }
    pub fn with_max_upload_size(mut self, bytes: u64) -> Self { self.max_upload_size = bytes; self }
    pub fn with_page_limit(mut self, limit: u32) -> Self { self.page_limit = limit; self }
    pub fn with_debounce(mut self, quiet: Duration) -> Self { self.debounce = quiet; self }

    /// Check the API URL parses as an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_url).map_err(|e| ClientError::InvalidUrl { url: self.api_url.clone(), message: e.to_string() })?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(ClientError::config(format!("unsupported scheme '{}' in api url", other))),
        }
        if self.page_limit == 0 { return Err(ClientError::config("page limit must be positive")); }
        Ok(())
    }

    /// Base URL with any trailing slash removed so `base + "/endpoint"` stays well formed.
    pub fn base(&self) -> &str { self.api_url.trim_end_matches('/') }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|s| s.trim().parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend() {
        let c = ClientConfig::default();
        assert_eq!(c.api_url, "http://localhost:8080/api");
        assert_eq!(c.max_upload_size, 5 * 1024 * 1024);
        assert_eq!(c.debounce, Duration::from_millis(500));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn base_strips_trailing_slash() {
        let c = ClientConfig::default().with_api_url("http://example.test/api/");
        assert_eq!(c.base(), "http://example.test/api");
    }

    #[test]
    fn rejects_bad_urls() {
        assert!(ClientConfig::default().with_api_url("not a url").validate().is_err());
        let err = ClientConfig::default().with_api_url("ftp://host/api").validate().unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn zero_page_limit_is_rejected() {
        let err = ClientConfig::default().with_page_limit(0).validate().unwrap_err();
        assert!(err.to_string().contains("page limit"));
    }
}
