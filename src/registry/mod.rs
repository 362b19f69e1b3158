//! Registries for projects, clients, engineers, and monitoring stations.
//!
//! Stations are the hub of the record books: they carry many-to-many
//! associations to projects and clients, a pipeline system assignment, and
//! the maintenance frequency that drives due-date scheduling. The module
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
