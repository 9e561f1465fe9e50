//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use shellwatch_config::ConfigError;
use shellwatch_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach Shelly Cloud shard '{server}'")]
    #[diagnostic(
        code(shellwatch::connection_failed),
        help(
            "Check the shard identifier ('{server}' should look like 'shelly-32-eu')\n\
             and your network connectivity."
        )
    )]
    ConnectionFailed { server: String, reason: String },

    #[error("Fetch timed out after {seconds}s")]
    #[diagnostic(
        code(shellwatch::timeout),
        help("Increase --timeout or check cloud responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(shellwatch::auth_failed),
        help(
            "The cloud rejected your auth token.\n\
             Generate a new one under User Settings > Security > Authorization cloud key,\n\
             then update your config or the SHELLY_TOKEN environment variable."
        )
    )]
    AuthFailed,

    #[error("No auth token configured for account '{account}'")]
    #[diagnostic(
        code(shellwatch::no_token),
        help(
            "Set `token` or `token_env` for the account in your config file,\n\
             or pass --token / set SHELLY_TOKEN."
        )
    )]
    NoToken { account: String },

    #[error("Account '{name}' not found in configuration")]
    #[diagnostic(
        code(shellwatch::unknown_account),
        help("Available accounts: {available}")
    )]
    UnknownAccount { name: String, available: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Device '{device_id}' not in the current snapshot")]
    #[diagnostic(
        code(shellwatch::unknown_device),
        help(
            "The device may be offline or not yet reported by the cloud.\n\
             Run: shellwatch devices --all"
        )
    )]
    UnknownDevice { device_id: String },

    #[error("Device '{device_id}' has no '{path}' reading")]
    #[diagnostic(
        code(shellwatch::unknown_field),
        help("Only H&T devices report temperature and humidity channels.")
    )]
    UnknownField { device_id: String, path: String },

    // ── Upstream ─────────────────────────────────────────────────────
    #[error("Cloud refresh failed: {message}")]
    #[diagnostic(code(shellwatch::upstream))]
    Upstream { message: String },

    // ── Validation / configuration ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(shellwatch::validation))]
    Validation { field: String, reason: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(shellwatch::config))]
    Config(String),

    // ── IO / serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed | Self::NoToken { .. } => exit_code::AUTH,
            Self::UnknownDevice { .. } | Self::UnknownField { .. } | Self::UnknownAccount { .. } => {
                exit_code::NOT_FOUND
            }
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed { .. } => CliError::AuthFailed,
            CoreError::ConnectionFailed { server, reason } => {
                CliError::ConnectionFailed { server, reason }
            }
            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },
            CoreError::UnknownDevice { device_id } => CliError::UnknownDevice { device_id },
            CoreError::UnknownField { device_id, path } => {
                CliError::UnknownField { device_id, path }
            }
            CoreError::Upstream { message } => CliError::Upstream { message },
            CoreError::Config { message } => CliError::Config(message),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoToken { account } => CliError::NoToken { account },
            ConfigError::UnknownAccount { account } => CliError::UnknownAccount {
                name: account,
                available: String::new(),
            },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other.to_string()),
        }
    }
}
