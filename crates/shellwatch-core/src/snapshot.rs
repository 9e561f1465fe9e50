// ── Snapshot: immutable point-in-time device state ──
//
// Replaced wholesale on every successful refresh, never mutated in place.
// Readers holding an `Arc<Snapshot>` keep a stable view while the
// coordinator fetches and publishes a newer generation.

use shellwatch_api::{DeviceStatus, DeviceStatusMap, FwInfo};

use crate::error::CoreError;

/// Immutable mapping of device identifier to its latest status block,
/// in upstream discovery order.
#[derive(Debug, Default)]
pub struct Snapshot {
    devices: DeviceStatusMap,
}

impl Snapshot {
    pub(crate) fn new(devices: DeviceStatusMap) -> Self {
        Self { devices }
    }

    /// `true` before the first successful refresh (or for an empty fleet).
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// All device identifiers, in discovery order.
    pub fn device_ids(&self) -> impl Iterator<Item = &str> {
        self.devices.keys().map(String::as_str)
    }

    /// Look up one device's status block.
    pub fn device(&self, device_id: &str) -> Result<&DeviceStatus, CoreError> {
        self.devices
            .get(device_id)
            .ok_or_else(|| CoreError::UnknownDevice {
                device_id: device_id.to_owned(),
            })
    }

    /// Resolve a numeric reading by device and measurement path.
    pub fn reading(&self, device_id: &str, path: &[&str]) -> Result<f64, CoreError> {
        self.device(device_id)?
            .number(path)
            .ok_or_else(|| CoreError::UnknownField {
                device_id: device_id.to_owned(),
                path: path.join("."),
            })
    }

    /// The firmware descriptor for one device.
    pub fn firmware(&self, device_id: &str) -> Result<&FwInfo, CoreError> {
        Ok(&self.device(device_id)?.getinfo.fw_info)
    }

    /// Device identifiers whose firmware descriptor satisfies `predicate`,
    /// in discovery order. Evaluated fresh against this snapshot -- nothing
    /// is cached between generations.
    pub fn devices_matching(&self, predicate: impl Fn(&FwInfo) -> bool) -> Vec<String> {
        self.devices
            .iter()
            .filter(|(_, status)| predicate(&status.getinfo.fw_info))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Identifiers of H&T temperature/humidity sensors in this snapshot.
    pub fn ht_device_ids(&self) -> Vec<String> {
        self.devices_matching(|fw| fw.device.starts_with(crate::HT_DEVICE_PREFIX))
    }
}
