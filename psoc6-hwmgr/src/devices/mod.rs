//! Resource catalogs of the supported devices
//!
//! All catalogs are always available. The `psoc6-01`, `psoc6-02` and
//! `psoc6-03` crate features only pick the one behind
//! `HWMGR`.

pub mod psoc6_01;
pub mod psoc6_02;
pub mod psoc6_03;
