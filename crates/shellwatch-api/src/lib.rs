//! Async client for the Shelly Cloud device status API.
//!
//! One endpoint, one client: [`CloudClient::all_status`] issues
//! `POST https://{server}.shelly.cloud/device/all_status` with the account's
//! auth token and unwraps the `{ isok, data: { devices_status } }` envelope
//! into an ordered [`DeviceStatusMap`]. Higher layers (`shellwatch-core`)
//! decide how often to call it and what to do with failures.

pub mod cloud;
pub mod error;
pub mod transport;
pub mod types;

pub use cloud::CloudClient;
pub use error::Error;
pub use transport::TransportConfig;
pub use types::{DeviceStatus, DeviceStatusMap, FwInfo};
