// ── Sensor projections (device views) ──
//
// One `Sensor` presents one measurement of one physical device as a named,
// typed value sourced from the coordinator's cache. Temperature and humidity
// are the same type parameterized by `Measurement`, not two hand-duplicated
// ones.

use std::sync::Mutex;

use tracing::debug;

use crate::coordinator::Coordinator;
use crate::error::CoreError;
use crate::snapshot::Snapshot;

/// Reported manufacturer for registry metadata.
pub const MANUFACTURER: &str = "Shelly";

/// Reported model name for H&T devices.
pub const MODEL: &str = "H&T";

/// State classification shared by both measurements.
pub const STATE_CLASS: &str = "measurement";

/// Which measurement of a device a sensor projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    Temperature,
    Humidity,
}

impl Measurement {
    /// Path of the reading inside the device's status block.
    pub fn field_path(self) -> &'static [&'static str] {
        match self {
            Self::Temperature => &["tmp", "value"],
            Self::Humidity => &["hum", "value"],
        }
    }

    /// Unit of measurement: Celsius or percentage.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Humidity => "%",
        }
    }

    /// Measurement classification for entity/state consumers.
    pub fn device_class(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
        }
    }

    /// Suffix appended to the device identifier to form the unique key.
    fn suffix(self) -> &'static str {
        match self {
            Self::Temperature => "tmp",
            Self::Humidity => "hum",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Temperature => "Temp",
            Self::Humidity => "Humidity",
        }
    }
}

/// Emitted when a device's reported firmware version transitions.
///
/// Produced by [`Sensor::handle_refresh`] only on change, never on every
/// refresh; the device registry collaborator consumes these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareChange {
    pub device_id: String,
    pub version: String,
}

/// Registry metadata for one physical device.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DeviceInfo {
    pub id: String,
    pub name: String,
    pub model: &'static str,
    pub manufacturer: &'static str,
    pub sw_version: String,
}

/// One measurement of one device, projected from the shared snapshot.
pub struct Sensor {
    coordinator: Coordinator,
    device_id: String,
    measurement: Measurement,
    /// Firmware version last observed by this view, for edge-triggered
    /// change notification.
    last_fw: Mutex<String>,
}

impl Sensor {
    /// Build a sensor view, seeding the observed firmware version from the
    /// coordinator's current snapshot (empty if the device is not yet known).
    pub fn new(coordinator: Coordinator, device_id: impl Into<String>, measurement: Measurement) -> Self {
        let device_id = device_id.into();
        let last_fw = coordinator
            .snapshot()
            .firmware(&device_id)
            .map(|fw| fw.fw.clone())
            .unwrap_or_default();
        Self {
            coordinator,
            device_id,
            measurement,
            last_fw: Mutex::new(last_fw),
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn measurement(&self) -> Measurement {
        self.measurement
    }

    /// Stable unique key across all sensors sharing a coordinator:
    /// device identifier + measurement suffix.
    pub fn unique_id(&self) -> String {
        format!("{}{}", self.device_id, self.measurement.suffix())
    }

    /// Display name, e.g. `"Shelly Temp ABC123"`.
    pub fn name(&self) -> String {
        format!("Shelly {} {}", self.measurement.label(), self.device_id)
    }

    /// Current reading, refreshing the shared cache first if it is stale.
    pub async fn value(&self) -> Result<f64, CoreError> {
        self.coordinator.ensure_fresh().await;
        self.coordinator
            .reading(&self.device_id, self.measurement.field_path())
    }

    /// Reading from an already-held snapshot, without touching the network.
    pub fn value_from(&self, snapshot: &Snapshot) -> Result<f64, CoreError> {
        snapshot.reading(&self.device_id, self.measurement.field_path())
    }

    /// Reactive hook for a freshly published snapshot.
    ///
    /// Returns a [`FirmwareChange`] iff the device's reported firmware
    /// version differs from the last one this view observed.
    pub fn handle_refresh(&self, snapshot: &Snapshot) -> Option<FirmwareChange> {
        let fw = snapshot.firmware(&self.device_id).ok()?.fw.clone();
        let mut last = self.last_fw.lock().expect("fw lock poisoned");
        if *last == fw {
            return None;
        }
        debug!(device_id = %self.device_id, from = %*last, to = %fw, "firmware version changed");
        *last = fw.clone();
        Some(FirmwareChange {
            device_id: self.device_id.clone(),
            version: fw,
        })
    }

    /// Registry metadata for this sensor's device.
    pub fn device_info(&self, snapshot: &Snapshot) -> Result<DeviceInfo, CoreError> {
        let fw = snapshot.firmware(&self.device_id)?;
        Ok(DeviceInfo {
            id: self.device_id.clone(),
            name: format!("{MODEL} {}", self.device_id),
            model: MODEL,
            manufacturer: MANUFACTURER,
            sw_version: fw.fw.clone(),
        })
    }
}

/// Discover H&T devices and build one temperature and one humidity sensor
/// per device.
///
/// Performs the initial forced refresh first, so setup-time failures
/// (notably authentication) surface to the caller instead of being absorbed
/// by the steady-state stale-data policy.
pub async fn discover(coordinator: &Coordinator) -> Result<Vec<Sensor>, CoreError> {
    coordinator.refresh_now().await?;

    let mut sensors = Vec::new();
    for device_id in coordinator.ht_device_ids() {
        sensors.push(Sensor::new(
            coordinator.clone(),
            device_id.clone(),
            Measurement::Temperature,
        ));
        sensors.push(Sensor::new(coordinator.clone(), device_id, Measurement::Humidity));
    }
    Ok(sensors)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn measurement_paths_and_units() {
        assert_eq!(Measurement::Temperature.field_path(), ["tmp", "value"]);
        assert_eq!(Measurement::Humidity.field_path(), ["hum", "value"]);
        assert_eq!(Measurement::Temperature.unit(), "°C");
        assert_eq!(Measurement::Humidity.unit(), "%");
    }

    #[test]
    fn unique_ids_differ_per_measurement() {
        assert_ne!(Measurement::Temperature.suffix(), Measurement::Humidity.suffix());
    }
}
