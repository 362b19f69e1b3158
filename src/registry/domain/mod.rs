//! Domain model for the project, client, engineer, and station registries.
//!
//! All aggregates carry the shared soft-delete state and timestamp pair
//! from [`crate::record`] and validate their fields at construction time;
//! infrastructure concerns stay outside the domain boundary.

mod client;
mod engineer;
mod error;
mod ids;
mod project;
mod station;

pub use client::{Client, PersistedClientData};
pub use engineer::{Engineer, PersistedEngineerData};
pub use error::{ParsePipelineSystemError, RegistryDomainError};
pub use ids::{ClientId, EngineerId, IdentityRef, ProjectId, StationId};
pub use project::{PersistedProjectData, Project};
pub use station::{
    Coordinates, MaintenanceFrequency, NewStation, PersistedStationData, PipelineSystem, Station,
};
