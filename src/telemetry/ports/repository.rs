//! Repository ports for telemetry persistence.

use crate::registry::domain::StationId;
use crate::telemetry::domain::{DataPlanDavis, DataPlanId, DavisStation, DavisStationId};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Result type for telemetry repository operations.
pub type TelemetryRepositoryResult<T> = Result<T, TelemetryRepositoryError>;

/// Entity kind carried by telemetry repository errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryEntity {
    /// Data-plan record.
    DataPlan,
    /// Station-device link record.
    DavisStation,
}

impl fmt::Display for TelemetryEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::DataPlan => "data plan",
            Self::DavisStation => "davis station",
        };
        f.write_str(label)
    }
}

/// Errors returned by telemetry repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TelemetryRepositoryError {
    /// The record was not found.
    #[error("{0} not found: {1}")]
    NotFound(TelemetryEntity, Uuid),

    /// A record with the same identifier already exists.
    #[error("duplicate {0} identifier: {1}")]
    Duplicate(TelemetryEntity, Uuid),

    /// Concurrent write conflict surfaced by the storage layer.
    #[error("storage write conflict: {0}")]
    Conflict(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TelemetryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Data-plan persistence contract.
///
/// Implementations own the plan-to-device cascade: hard deleting a plan
/// removes the device links that transmit over it.
#[async_trait]
pub trait DataPlanRepository: Send + Sync {
    /// Stores a new data plan.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryRepositoryError::Duplicate`] when the identifier
    /// already exists.
    async fn store(&self, plan: &DataPlanDavis) -> TelemetryRepositoryResult<()>;

    /// Persists changes to an existing data plan.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryRepositoryError::NotFound`] when the plan does
    /// not exist.
    async fn update(&self, plan: &DataPlanDavis) -> TelemetryRepositoryResult<()>;

    /// Finds a data plan by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: DataPlanId) -> TelemetryRepositoryResult<Option<DataPlanDavis>>;

    /// Returns all data plans ordered by code.
    async fn list(&self) -> TelemetryRepositoryResult<Vec<DataPlanDavis>>;

    /// Hard deletes a data plan and its device links.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryRepositoryError::NotFound`] when the plan does
    /// not exist.
    async fn delete(&self, id: DataPlanId) -> TelemetryRepositoryResult<()>;
}

/// Station-device link persistence contract.
#[async_trait]
pub trait DavisStationRepository: Send + Sync {
    /// Stores a new device link.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryRepositoryError::Duplicate`] when the identifier
    /// already exists.
    async fn store(&self, device: &DavisStation) -> TelemetryRepositoryResult<()>;

    /// Persists changes to an existing device link.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryRepositoryError::NotFound`] when the link does
    /// not exist.
    async fn update(&self, device: &DavisStation) -> TelemetryRepositoryResult<()>;

    /// Finds a device link by identifier. Returns `None` when absent.
    async fn find_by_id(
        &self,
        id: DavisStationId,
    ) -> TelemetryRepositoryResult<Option<DavisStation>>;

    /// Returns the device links installed at a station, ordered by name.
    async fn list_by_station(
        &self,
        station: StationId,
    ) -> TelemetryRepositoryResult<Vec<DavisStation>>;

    /// Returns all device links ordered by name.
    async fn list(&self) -> TelemetryRepositoryResult<Vec<DavisStation>>;

    /// Hard deletes a device link.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryRepositoryError::NotFound`] when the link does
    /// not exist.
    async fn delete(&self, id: DavisStationId) -> TelemetryRepositoryResult<()>;

    /// Hard deletes every device link installed at a station. Returns the
    /// number of links removed.
    async fn delete_by_station(&self, station: StationId) -> TelemetryRepositoryResult<usize>;
}
