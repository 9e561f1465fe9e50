//! CLI configuration — thin wrapper around `shellwatch_config` shared types.
//!
//! Adds CLI-specific resolution that respects `GlobalOpts` flag overrides
//! (--server, --token, --interval, --timeout).

use std::time::Duration;

use secrecy::SecretString;

use shellwatch_core::AccountConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use shellwatch_config::{Config, config_path, load_config_or_default};

/// Resolve the active account name from CLI flags and config.
pub fn active_account_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .account
        .clone()
        .or_else(|| config.default_account.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build an `AccountConfig` from the config file, account, and CLI overrides.
///
/// Flags beat environment beats profile; `--server` + `--token` alone are
/// enough to run without any config file.
pub fn resolve_account_config(global: &GlobalOpts) -> Result<AccountConfig, CliError> {
    resolve_from(global, &load_config_or_default())
}

fn resolve_from(global: &GlobalOpts, cfg: &Config) -> Result<AccountConfig, CliError> {
    let account_name = active_account_name(global, cfg);

    let mut resolved = if let Some(account) = cfg.accounts.get(&account_name) {
        shellwatch_config::account_to_core_config(account, &account_name, &cfg.defaults)?
    } else if let Some(ref server) = global.server {
        // No profile -- flags/env must carry everything.
        let token = global
            .token
            .clone()
            .ok_or_else(|| CliError::NoToken {
                account: account_name.clone(),
            })?;
        AccountConfig::new(server.clone(), SecretString::from(token))
    } else {
        let mut names: Vec<&String> = cfg.accounts.keys().collect();
        names.sort();
        return Err(CliError::UnknownAccount {
            name: account_name,
            available: names
                .iter()
                .map(|n| n.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        });
    };

    // CLI flag overrides
    if let Some(ref server) = global.server {
        resolved.server.clone_from(server);
    }
    if let Some(ref token) = global.token {
        resolved.auth_key = SecretString::from(token.clone());
    }
    if let Some(interval) = global.interval {
        resolved.update_interval = Duration::from_secs(interval);
    }
    if let Some(timeout) = global.timeout {
        resolved.timeout = Duration::from_secs(timeout);
    }

    Ok(resolved)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shellwatch_config::Account;

    fn global_opts() -> GlobalOpts {
        GlobalOpts {
            account: None,
            server: None,
            token: None,
            interval: None,
            timeout: None,
            output: crate::cli::OutputFormat::Table,
            verbose: 0,
            quiet: false,
        }
    }

    fn config_with_account(timeout: Option<u64>) -> Config {
        let mut cfg = Config::default();
        cfg.accounts.insert(
            "default".into(),
            Account {
                server: "shelly-32-eu".into(),
                token: Some("t".into()),
                token_env: None,
                update_interval: Some(60),
                timeout,
            },
        );
        cfg
    }

    #[test]
    fn profile_timeout_survives_without_flag() {
        let cfg = config_with_account(Some(20));
        let resolved = resolve_from(&global_opts(), &cfg).unwrap();
        assert_eq!(resolved.timeout, Duration::from_secs(20));
    }

    #[test]
    fn timeout_flag_overrides_profile() {
        let cfg = config_with_account(Some(20));
        let mut global = global_opts();
        global.timeout = Some(5);
        let resolved = resolve_from(&global, &cfg).unwrap();
        assert_eq!(resolved.timeout, Duration::from_secs(5));
    }

    #[test]
    fn flags_alone_resolve_without_profile() {
        let mut global = global_opts();
        global.server = Some("shelly-55-eu".into());
        global.token = Some("tok".into());
        let resolved = resolve_from(&global, &Config::default()).unwrap();
        assert_eq!(resolved.server, "shelly-55-eu");
    }
}
