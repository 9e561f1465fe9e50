// Wire types for the `/device/all_status` response.
//
// Only the firmware descriptor is modeled with named fields -- the rest of a
// device's status block is a free-form bag of measurement channels ("tmp",
// "hum", "bat", ...) that varies by device generation, so it is carried as
// raw JSON and addressed by field path.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered map of device identifier to its latest status block.
///
/// `IndexMap` keeps the iteration order of the upstream response, so device
/// discovery is stable across refreshes of an unchanged fleet.
pub type DeviceStatusMap = IndexMap<String, DeviceStatus>;

/// Status block for one device, as reported by the cloud.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceStatus {
    /// Device self-description. Missing on some garbled responses; defaults
    /// keep a partially-known device readable instead of failing the whole
    /// snapshot parse.
    #[serde(default)]
    pub getinfo: GetInfo,

    /// Everything else: measurement channels keyed by name.
    #[serde(flatten)]
    pub channels: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetInfo {
    #[serde(default)]
    pub fw_info: FwInfo,
}

/// Firmware descriptor: device type string and firmware version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FwInfo {
    /// Device type, e.g. `"shellyht-v1"`.
    #[serde(default)]
    pub device: String,
    /// Firmware version string, e.g. `"20230913-112003/v1.14.0"`.
    #[serde(default)]
    pub fw: String,
}

impl DeviceStatus {
    /// Resolve a value inside the channel bag by path, e.g. `["tmp", "value"]`.
    pub fn channel(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.channels.get(*first)?;
        for segment in rest {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// Resolve a channel path to a numeric reading.
    pub fn number(&self, path: &[&str]) -> Option<f64> {
        self.channel(path)?.as_f64()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ht_status() -> DeviceStatus {
        serde_json::from_value(json!({
            "tmp": { "value": 21.5, "units": "C" },
            "hum": { "value": 47 },
            "bat": { "value": 91 },
            "getinfo": { "fw_info": { "device": "shellyht-v1", "fw": "1.0" } }
        }))
        .unwrap()
    }

    #[test]
    fn channel_path_resolves_nested_values() {
        let status = ht_status();
        assert_eq!(status.number(&["tmp", "value"]), Some(21.5));
        assert_eq!(status.number(&["hum", "value"]), Some(47.0));
        assert_eq!(status.channel(&["tmp", "units"]).unwrap(), "C");
    }

    #[test]
    fn channel_path_miss_is_none() {
        let status = ht_status();
        assert!(status.channel(&["lux", "value"]).is_none());
        assert!(status.number(&["tmp", "missing"]).is_none());
    }

    #[test]
    fn getinfo_is_typed() {
        let status = ht_status();
        assert_eq!(status.getinfo.fw_info.device, "shellyht-v1");
        assert_eq!(status.getinfo.fw_info.fw, "1.0");
        // getinfo must not leak into the channel bag
        assert!(status.channels.get("getinfo").is_none());
    }

    #[test]
    fn missing_getinfo_defaults_to_empty() {
        let status: DeviceStatus =
            serde_json::from_value(json!({ "tmp": { "value": 3.0 } })).unwrap();
        assert_eq!(status.getinfo.fw_info.device, "");
    }
}
