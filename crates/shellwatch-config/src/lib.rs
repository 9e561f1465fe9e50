//! Shared configuration for shellwatch consumers.
//!
//! TOML account profiles, token resolution (env var or plaintext), and
//! translation to `shellwatch_core::AccountConfig`. The CLI layers flag
//! overrides on top of what this crate resolves.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shellwatch_core::AccountConfig;
use shellwatch_core::config::{DEFAULT_UPDATE_INTERVAL, MAX_UPDATE_INTERVAL, MIN_UPDATE_INTERVAL};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no auth token configured for account '{account}'")]
    NoToken { account: String },

    #[error("account '{account}' not found in configuration")]
    UnknownAccount { account: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default account name.
    pub default_account: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named cloud accounts.
    #[serde(default)]
    pub accounts: HashMap<String, Account>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_account: Some("default".into()),
            defaults: Defaults::default(),
            accounts: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_update_interval")]
    pub update_interval: u64,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            update_interval: default_update_interval(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_update_interval() -> u64 {
    DEFAULT_UPDATE_INTERVAL.as_secs()
}
fn default_timeout() -> u64 {
    10
}

/// A named Shelly Cloud account.
#[derive(Debug, Deserialize, Serialize)]
pub struct Account {
    /// Cloud shard identifier, e.g. `"shelly-32-eu"`.
    pub server: String,

    /// Auth token (plaintext -- prefer token_env).
    pub token: Option<String>,

    /// Environment variable name containing the auth token.
    pub token_env: Option<String>,

    /// Polling cadence override in seconds.
    pub update_interval: Option<u64>,

    /// Fetch timeout override in seconds.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "shellwatch", "shellwatch").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("shellwatch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from an explicit path (the seam used by tests).
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SHELLY_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Token resolution ────────────────────────────────────────────────

/// Resolve an auth token: env var named in the account, then plaintext.
pub fn resolve_token(account: &Account, account_name: &str) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = account.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Some(ref token) = account.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoToken {
        account: account_name.into(),
    })
}

/// Build an `AccountConfig` from a named account -- no CLI flag overrides.
pub fn account_to_core_config(
    account: &Account,
    account_name: &str,
    defaults: &Defaults,
) -> Result<AccountConfig, ConfigError> {
    if account.server.is_empty() || account.server.contains('/') || account.server.contains('.') {
        return Err(ConfigError::Validation {
            field: "server".into(),
            reason: format!(
                "expected a shard identifier like 'shelly-32-eu', got '{}'",
                account.server
            ),
        });
    }

    let auth_key = resolve_token(account, account_name)?;
    let interval_secs = account.update_interval.unwrap_or(defaults.update_interval);
    let timeout_secs = account.timeout.unwrap_or(defaults.timeout);

    let mut cfg = AccountConfig::new(account.server.clone(), auth_key)
        .with_update_interval(Duration::from_secs(interval_secs));
    cfg.timeout = Duration::from_secs(timeout_secs);
    Ok(cfg)
}

/// Interval bounds re-exported for validation messages.
pub fn interval_bounds() -> (Duration, Duration) {
    (MIN_UPDATE_INTERVAL, MAX_UPDATE_INTERVAL)
}
