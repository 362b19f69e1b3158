//! Stationbook: record keeping for field-equipment maintenance.
//!
//! This crate tracks projects, clients, monitoring stations, the service
//! orders issued against those stations, the maintenance records derived
//! from those orders, and the telemetry data plans used by devices
//! installed at stations.
//!
//! # Architecture
//!
//! Stationbook follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`registry`]: Project, client, engineer, and station registries
//! - [`workorder`]: Service-order ledger and maintenance due-date records
//! - [`telemetry`]: Data plans and station-device links
//! - [`decommission`]: Cross-context cascade deletion

pub mod decommission;
pub mod record;
pub mod registry;
pub mod telemetry;
pub mod workorder;

#[cfg(test)]
pub(crate) mod testing;
