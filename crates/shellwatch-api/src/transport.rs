// Shared transport configuration for building reqwest::Client instances.
//
// The Shelly Cloud enforces no keep-alive contract and answers slowly under
// load, so the request timeout here is the coordinator's hard fetch bound:
// exceeding it fails that refresh attempt only.

use std::time::Duration;

/// Hard fetch timeout applied when the caller doesn't override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("shellwatch/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(crate::error::Error::Transport)
    }

    /// Override the fetch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
