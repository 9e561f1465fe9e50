//! Device listing.

use tabled::Tabled;

use shellwatch_core::{Coordinator, sensor};

use crate::cli::{DevicesArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(serde::Serialize)]
struct DeviceListing {
    id: String,
    device_type: String,
    firmware: String,
    name: String,
}

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    device_type: String,
    #[tabled(rename = "Firmware")]
    firmware: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&DeviceListing> for DeviceRow {
    fn from(d: &DeviceListing) -> Self {
        Self {
            id: d.id.clone(),
            device_type: d.device_type.clone(),
            firmware: d.firmware.clone(),
            name: d.name.clone(),
        }
    }
}

pub async fn handle(
    args: &DevicesArgs,
    coordinator: &Coordinator,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    coordinator.refresh_now().await?;
    let snapshot = coordinator.snapshot();

    let ids: Vec<String> = if args.all {
        snapshot.device_ids().map(str::to_owned).collect()
    } else {
        snapshot.ht_device_ids()
    };

    let listings: Vec<DeviceListing> = ids
        .iter()
        .map(|id| {
            let fw = snapshot.firmware(id)?;
            let name = if fw.device.starts_with(shellwatch_core::HT_DEVICE_PREFIX) {
                format!("{} {id}", sensor::MODEL)
            } else {
                format!("{} {id}", fw.device)
            };
            Ok(DeviceListing {
                id: id.clone(),
                device_type: fw.device.clone(),
                firmware: fw.fw.clone(),
                name,
            })
        })
        .collect::<Result<_, shellwatch_core::CoreError>>()?;

    let rendered = output::render_list(
        &global.output,
        &listings,
        |d| DeviceRow::from(d),
        |d| d.id.clone(),
    )?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
