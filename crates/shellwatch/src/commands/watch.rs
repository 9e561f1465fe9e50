//! Continuous polling loop.
//!
//! Discovers the H&T fleet, spawns the coordinator's poll task, and prints
//! readings on every snapshot publication plus firmware-change notifications
//! as they occur. Runs until Ctrl-C or `--updates` is reached.

use std::collections::BTreeSet;

use tokio_util::sync::CancellationToken;
use tracing::info;

use shellwatch_core::{Coordinator, Sensor, sensor};

use crate::cli::{GlobalOpts, WatchArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    args: &WatchArgs,
    coordinator: &Coordinator,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // Initial forced refresh + discovery; setup errors surface here.
    let sensors = sensor::discover(coordinator).await?;
    if sensors.is_empty() {
        output::print_output("No H&T sensors on this account.", global.quiet);
        return Ok(());
    }

    info!(
        sensor_count = sensors.len(),
        interval = %humantime::format_duration(coordinator.update_interval()),
        "watching"
    );

    let mut rx = coordinator.subscribe();
    // The discovery snapshot is already current; print it once, then wait
    // for publications from the poll task.
    print_readings(&sensors, &coordinator.snapshot(), global);

    let cancel = CancellationToken::new();
    let poll = coordinator.spawn_poll_task(cancel.clone());

    let mut seen: u64 = 1;
    loop {
        if let Some(limit) = args.updates {
            if seen >= limit {
                break;
            }
        }

        tokio::select! {
            biased;
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = rx.borrow_and_update().clone();
                seen += 1;

                // Firmware notifications, deduplicated per device: both the
                // temperature and humidity view of one device observe the
                // same transition.
                let mut notified = BTreeSet::new();
                for s in &sensors {
                    if let Some(change) = s.handle_refresh(&snapshot) {
                        if notified.insert(change.device_id.clone()) {
                            output::print_output(
                                &format!(
                                    "firmware updated: {} -> {}",
                                    change.device_id, change.version
                                ),
                                global.quiet,
                            );
                        }
                    }
                }

                print_readings(&sensors, &snapshot, global);
            }
        }
    }

    cancel.cancel();
    let _ = poll.await;
    Ok(())
}

fn print_readings(sensors: &[Sensor], snapshot: &shellwatch_core::Snapshot, global: &GlobalOpts) {
    for s in sensors {
        match s.value_from(snapshot) {
            Ok(value) => output::print_output(
                &format!("{} = {}{}", s.name(), value, s.measurement().unit()),
                global.quiet,
            ),
            // Absent device or channel: temporarily unavailable, not fatal.
            Err(err) => tracing::debug!(sensor = %s.unique_id(), error = %err, "no reading"),
        }
    }
}
