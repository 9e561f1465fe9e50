// ── Runtime account configuration ──
//
// Describes *how* to poll one Shelly Cloud account. Carries the credential
// and polling cadence, but never touches disk -- the CLI (or another host)
// constructs an `AccountConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;

/// Lower bound on the polling cadence. The cloud rate-limits aggressively;
/// anything faster than this gets clamped.
pub const MIN_UPDATE_INTERVAL: Duration = Duration::from_secs(10);

/// Upper bound on the polling cadence.
pub const MAX_UPDATE_INTERVAL: Duration = Duration::from_secs(900);

/// Default polling cadence.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(30);

/// Configuration for polling a single Shelly Cloud account.
///
/// An account is the pair (cloud shard, auth token); it owns exactly one
/// [`Coordinator`](crate::Coordinator) and is immutable after creation.
#[derive(Debug, Clone)]
pub struct AccountConfig {
    /// Cloud shard identifier, e.g. `"shelly-32-eu"`.
    pub server: String,
    /// Account auth token, sent as the `auth_key` query parameter.
    pub auth_key: SecretString,
    /// Minimum time between successive network refreshes.
    pub update_interval: Duration,
    /// Hard timeout for a single fetch.
    pub timeout: Duration,
}

impl AccountConfig {
    pub fn new(server: impl Into<String>, auth_key: SecretString) -> Self {
        Self {
            server: server.into(),
            auth_key,
            update_interval: DEFAULT_UPDATE_INTERVAL,
            timeout: shellwatch_api::transport::DEFAULT_TIMEOUT,
        }
    }

    /// Set the polling cadence (clamped on read, not here).
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    /// The configured interval clamped into the supported range.
    pub fn clamped_interval(&self) -> Duration {
        self.update_interval
            .clamp(MIN_UPDATE_INTERVAL, MAX_UPDATE_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(secs: u64) -> AccountConfig {
        AccountConfig::new("shelly-32-eu", SecretString::from("t".to_string()))
            .with_update_interval(Duration::from_secs(secs))
    }

    #[test]
    fn interval_clamps_to_bounds() {
        assert_eq!(config_with(1).clamped_interval(), MIN_UPDATE_INTERVAL);
        assert_eq!(config_with(3600).clamped_interval(), MAX_UPDATE_INTERVAL);
        assert_eq!(config_with(60).clamped_interval(), Duration::from_secs(60));
    }

    #[test]
    fn default_interval_is_within_bounds() {
        let cfg = AccountConfig::new("shelly-32-eu", SecretString::from("t".to_string()));
        assert_eq!(cfg.clamped_interval(), DEFAULT_UPDATE_INTERVAL);
    }
}
