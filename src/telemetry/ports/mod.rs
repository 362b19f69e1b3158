//! Port contracts for the telemetry context.

mod repository;

pub use repository::{
    DataPlanRepository, DavisStationRepository, TelemetryEntity, TelemetryRepositoryError,
    TelemetryRepositoryResult,
};
