//! Client configuration

/// Configuration for connecting to the scheduling service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Request timeout in seconds. The service applies no deadline of
    /// its own, so this is the only thing standing between a stuck
    /// call and a frozen action.
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a configuration with the default 30s timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}
