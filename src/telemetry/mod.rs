//! Telemetry data plans and station-device links.
//!
//! Data plans carry a fixed 180-day validity window; Davis devices link a
//! station to the plan they transmit over. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
