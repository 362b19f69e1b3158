//! `PostgreSQL` adapters for the telemetry context.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{PostgresTelemetryRepository, TelemetryPgPool};
