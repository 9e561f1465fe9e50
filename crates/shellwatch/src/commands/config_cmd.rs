//! Config inspection commands.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
        ConfigCommand::Show => {
            let mut cfg = config::load_config_or_default();
            // Never echo credentials.
            for account in cfg.accounts.values_mut() {
                if account.token.is_some() {
                    account.token = Some("<redacted>".into());
                }
            }
            let rendered =
                toml::to_string_pretty(&cfg).map_err(|e| CliError::Config(e.to_string()))?;
            output::print_output(&rendered, global.quiet);
            Ok(())
        }
    }
}
