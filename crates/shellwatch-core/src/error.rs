// ── Core error types ──
//
// User-facing errors from shellwatch-core. Consumers never see raw HTTP
// status codes or JSON parse failures -- the `From<shellwatch_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Setup errors ─────────────────────────────────────────────────
    /// The cloud rejected the account token. Surfaced during setup
    /// validation so the user can be shown a corrective message; during
    /// steady-state polling it is logged and absorbed like any other
    /// refresh failure.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Cannot reach Shelly Cloud at {server}: {reason}")]
    ConnectionFailed { server: String, reason: String },

    #[error("Fetch timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Read errors ──────────────────────────────────────────────────
    /// The requested device is not in the current snapshot. Treat as
    /// "temporarily unavailable" -- the device may appear on a later
    /// refresh, or the snapshot may predate the first successful fetch.
    #[error("Device not found in snapshot: {device_id}")]
    UnknownDevice { device_id: String },

    /// The device exists but the requested measurement path does not
    /// resolve inside its status block.
    #[error("Field {path:?} not found for device {device_id}")]
    UnknownField { device_id: String, path: String },

    // ── Refresh errors (wrapped, not exposed raw) ────────────────────
    /// Any upstream failure during a forced refresh: bad HTTP status,
    /// garbled body, or an `isok: false` rejection.
    #[error("Cloud refresh failed: {message}")]
    Upstream { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<shellwatch_api::Error> for CoreError {
    fn from(err: shellwatch_api::Error) -> Self {
        match err {
            shellwatch_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            // Timeouts never arrive here: the API client classifies them
            // into its own Timeout variant with the configured bound.
            shellwatch_api::Error::Transport(ref e) => {
                if e.is_connect() {
                    CoreError::ConnectionFailed {
                        server: e
                            .url()
                            .and_then(url::Url::host_str)
                            .unwrap_or("<unknown>")
                            .to_owned(),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Upstream {
                        message: e.to_string(),
                    }
                }
            }
            shellwatch_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            shellwatch_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid server identifier: {e}"),
            },
            shellwatch_api::Error::Status { status } => CoreError::Upstream {
                message: format!("cloud returned HTTP {status}"),
            },
            shellwatch_api::Error::Rejected { message } => CoreError::Upstream {
                message: format!("cloud rejected the request: {message}"),
            },
            shellwatch_api::Error::Deserialization { message, body: _ } => CoreError::Upstream {
                message: format!("malformed cloud response: {message}"),
            },
        }
    }
}
