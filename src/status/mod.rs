//! Translation of the charger's raw status payload
//!
//! The firmware reports status as a flat JSON object keyed by short codes
//! (`car`, `amp`, `nrg`, `tma`, ...). [`map`] turns it into a
//! [`NormalizedStatus`] with stable names, units and enumerated labels.

pub mod codes;
pub mod mapper;
pub mod raw;
pub mod types;

pub use codes::{Adapter, CarStatus, ChargingAllowed, ErrorCode, ForceCharging, Toggle, WifiState};
pub use mapper::{map, round_to};
pub use raw::RawStatus;
pub use types::{ChargingDuration, EnergyByToken, NormalizedStatus};
