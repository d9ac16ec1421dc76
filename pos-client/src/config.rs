//! Client configuration

/// Menu service used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the menu service
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | POS_MENU_BASE_URL | http://localhost:3001/api | Menu service base URL |
/// | POS_REQUEST_TIMEOUT_SECS | 30 | Request timeout |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL (e.g., "http://localhost:3001/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load from environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("POS_MENU_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            timeout: std::env::var("POS_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create a network client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkMenuClient> {
        crate::NetworkMenuClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
