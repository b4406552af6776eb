//! Client configuration from the environment

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, without the `/ask` path
    pub base_url: String,
    /// Transport timeout for a single request
    pub timeout: Duration,
    /// Persist the session id here; in-memory only when unset
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_file: None,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup("SCIENCE_HELPER_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
            timeout: lookup("SCIENCE_HELPER_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map_or(defaults.timeout, Duration::from_secs),
            session_file: lookup("SCIENCE_HELPER_SESSION_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }
}
