//! Shared, rate-limited, cached data source for Shelly Cloud sensor fleets.
//!
//! This crate owns the update coordination logic between `shellwatch-api`
//! and consumers (CLI, embedding platforms):
//!
//! - **[`Coordinator`]** — One instance per configured account. Owns the
//!   cached [`Snapshot`], serializes refreshes (single-flight), enforces the
//!   freshness bound, and publishes each new snapshot wholesale through a
//!   `watch` channel. Refresh failures keep the previous snapshot in place
//!   and are logged, never raised to steady-state readers.
//!
//! - **[`Snapshot`]** — Immutable point-in-time view of every device's
//!   status, in upstream discovery order. Readers holding an `Arc<Snapshot>`
//!   see a stable view even while a newer one is being fetched.
//!
//! - **[`Sensor`]** — One measurement ([`Measurement::Temperature`] or
//!   [`Measurement::Humidity`]) of one device, projected from the shared
//!   snapshot, with a firmware-change notification hook for device
//!   registries.
//!
//! - **[`AccountConfig`]** — Server shard, auth token, and polling cadence
//!   for one account.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod sensor;
pub mod snapshot;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::AccountConfig;
pub use coordinator::Coordinator;
pub use error::CoreError;
pub use sensor::{DeviceInfo, FirmwareChange, Measurement, Sensor};
pub use snapshot::Snapshot;

/// Device-type prefix identifying an H&T temperature/humidity sensor.
pub const HT_DEVICE_PREFIX: &str = "shellyht-";
