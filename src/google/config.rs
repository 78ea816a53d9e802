use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Root of the Google Maps web service endpoints.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default user agent for requests.
pub const DEFAULT_USER_AGENT: &str = concat!("trip-planner/", env!("CARGO_PKG_VERSION"));

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for [`GoogleMapsClient`](super::GoogleMapsClient).
#[derive(Clone)]
pub struct GoogleMapsConfig {
    /// Base URL, e.g. `"https://maps.googleapis.com/maps/api"`.
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
    pub user_agent: String,
}

// The key is a credential; keep it out of debug output and logs.
impl fmt::Debug for GoogleMapsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleMapsConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for GoogleMapsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl GoogleMapsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Reads the key from `GOOGLE_MAPS_API_KEY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_key(std::env::var(API_KEY_ENV).ok())
    }

    /// Rejects a missing or blank key.
    pub fn from_key(api_key: Option<String>) -> Result<Self, ConfigError> {
        match api_key {
            Some(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(ConfigError::MissingApiKey),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Full URL of a JSON endpoint such as `geocode`.
    pub(super) fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}/json", self.base_url.trim_end_matches('/'), endpoint)
    }
}
