//! Service orders and maintenance records.
//!
//! A service order is a unit of field work executed by an engineer at a
//! station; each order can carry one maintenance record whose next due
//! date derives from the station's maintenance frequency. The module
//! follows hexagonal architecture:
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
