//! Setup-time credential validation.

use shellwatch_core::Coordinator;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Force one refresh against the live cloud and report what it found.
///
/// This is the one path where authentication failures surface directly
/// instead of being absorbed by the stale-data policy.
pub async fn handle(coordinator: &Coordinator, global: &GlobalOpts) -> Result<(), CliError> {
    coordinator.refresh_now().await?;

    let snapshot = coordinator.snapshot();
    let ht_count = snapshot.ht_device_ids().len();

    output::print_output(
        &format!(
            "OK: credentials accepted, {} device(s) on the account, {} H&T sensor(s)",
            snapshot.len(),
            ht_count
        ),
        global.quiet,
    );
    Ok(())
}
