//! Command handlers.

pub mod config_cmd;
pub mod devices;
pub mod read;
pub mod validate;
pub mod watch;

use shellwatch_core::Coordinator;

use crate::cli::{Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match command {
        Command::Config(args) => config_cmd::handle(&args, global),

        // Everything else talks to the cloud through one coordinator.
        command => {
            let account = config::resolve_account_config(global)?;
            let coordinator = Coordinator::from_config(&account)?;
            tracing::debug!(server = %account.server, "coordinator ready");

            match command {
                Command::Validate => validate::handle(&coordinator, global).await,
                Command::Devices(args) => devices::handle(&args, &coordinator, global).await,
                Command::Read(args) => read::handle(&args, &coordinator, global).await,
                Command::Watch(args) => watch::handle(&args, &coordinator, global).await,
                Command::Config(_) => unreachable!("handled above"),
            }
        }
    }
}
