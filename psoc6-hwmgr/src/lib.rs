//! Hardware resource manager for PSoC 6 HAL drivers
//!
//! Drivers reserve the peripheral blocks and channels they use before
//! configuring them, so that two drivers never program the same hardware.
//! Every `(type, block, channel)` triple the device has is one bit in a
//! packed bitmap; the layout of that bitmap is described by a per-device
//! [`Catalog`] computed at compile time.
//!
//! NOTE This crate is still under active development. This API will remain
//! volatile until 1.0.0
//!
//! # Crate features
//!
//! * **defmt** -
//!   Implement `defmt::Format` for the public types and log allocator activity
//! * **psoc6-01** / **psoc6-02** / **psoc6-03** -
//!   Provide the process-wide `HWMGR` static for the given device family
//!
//! The crate uses the [`critical-section`](https://crates.io/crates/critical-section)
//! crate for mutual exclusion; the final binary has to provide an
//! implementation (e.g. `cortex-m/critical-section-single-core`).

#![warn(missing_docs)]
#![no_std]

pub mod bitmap;
pub mod catalog;
pub mod devices;
mod error;
pub mod gpio;
pub mod manager;
pub mod resource;
pub mod routing;

pub use catalog::{Catalog, Layout};
pub use error::Error;
pub use manager::ResourceManager;
pub use resource::{ClockBlock, DividerType, ResourceInstance, ResourceType};
pub use routing::SignalRouting;

#[cfg(any(
    all(feature = "psoc6-01", feature = "psoc6-02"),
    all(feature = "psoc6-01", feature = "psoc6-03"),
    all(feature = "psoc6-02", feature = "psoc6-03"),
))]
compile_error!("enable only one of the `psoc6-01`, `psoc6-02` and `psoc6-03` features");

#[cfg(feature = "psoc6-01")]
use devices::psoc6_01 as device;
#[cfg(feature = "psoc6-02")]
use devices::psoc6_02 as device;
#[cfg(feature = "psoc6-03")]
use devices::psoc6_03 as device;

/// Resource manager sized for the device selected by the crate features.
#[cfg(any(feature = "psoc6-01", feature = "psoc6-02", feature = "psoc6-03"))]
pub type DeviceManager = ResourceManager<{ device::CATALOG.bitmap_bytes() }>;

/// The resource manager of the selected device.
///
/// All bits are clear at boot; nothing is ever torn down.
#[cfg(any(feature = "psoc6-01", feature = "psoc6-02", feature = "psoc6-03"))]
pub static HWMGR: DeviceManager = ResourceManager::new(&device::CATALOG);
