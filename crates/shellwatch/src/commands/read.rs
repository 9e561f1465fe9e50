//! One-shot measurement read.

use shellwatch_core::{Coordinator, Measurement, Sensor};

use crate::cli::{GlobalOpts, ReadArgs};
use crate::error::CliError;
use crate::output;

#[derive(serde::Serialize)]
struct Reading {
    device_id: String,
    measurement: &'static str,
    value: f64,
    unit: &'static str,
}

pub async fn handle(
    args: &ReadArgs,
    coordinator: &Coordinator,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let measurement: Measurement = args.measurement.into();
    let sensor = Sensor::new(coordinator.clone(), args.device_id.clone(), measurement);

    // ensure_fresh absorbs fetch failures, so force one refresh first
    // so setup errors (bad token, unreachable shard) reach the user.
    coordinator.refresh_now().await?;
    let value = sensor.value().await?;

    let reading = Reading {
        device_id: args.device_id.clone(),
        measurement: measurement.device_class(),
        value,
        unit: measurement.unit(),
    };

    let rendered = output::render_single(
        &global.output,
        &reading,
        |r| format!("{} {} = {}{}", r.device_id, r.measurement, r.value, r.unit),
        |r| r.value.to_string(),
    )?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
