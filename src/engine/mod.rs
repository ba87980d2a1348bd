//! Punch-in / punch-out rule engine: geofencing plus the time-of-day status
//! ladder. Everything here is pure and clock-free; callers pass in
//! office-local minutes since midnight.

pub mod geo;
pub mod status;

pub use geo::geofence;
pub use status::{evaluate_punch_in, evaluate_punch_out};
