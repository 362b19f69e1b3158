//! Repository ports for work-order persistence.

use crate::registry::domain::{EngineerId, StationId};
use crate::workorder::domain::{
    Maintenance, MaintenanceId, ServiceOrder, ServiceOrderId, TicketNumber,
};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Result type for work-order repository operations.
pub type WorkOrderRepositoryResult<T> = Result<T, WorkOrderRepositoryError>;

/// Entity kind carried by work-order repository errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkOrderEntity {
    /// Service-order record.
    ServiceOrder,
    /// Maintenance record.
    Maintenance,
}

impl fmt::Display for WorkOrderEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ServiceOrder => "service order",
            Self::Maintenance => "maintenance",
        };
        f.write_str(label)
    }
}

/// Errors returned by work-order repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkOrderRepositoryError {
    /// The record was not found.
    #[error("{0} not found: {1}")]
    NotFound(WorkOrderEntity, Uuid),

    /// A record with the same identifier already exists.
    #[error("duplicate {0} identifier: {1}")]
    Duplicate(WorkOrderEntity, Uuid),

    /// Concurrent write conflict surfaced by the storage layer.
    #[error("storage write conflict: {0}")]
    Conflict(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkOrderRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Service-order persistence contract.
///
/// Implementations own the ticket sequence and the maintenance cascade:
/// hard deleting an order removes its maintenance records with it.
#[async_trait]
pub trait ServiceOrderRepository: Send + Sync {
    /// Draws the next ticket number from the monotone sequence.
    async fn next_ticket(&self) -> WorkOrderRepositoryResult<TicketNumber>;

    /// Stores a new service order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderRepositoryError::Duplicate`] when the identifier
    /// already exists.
    async fn store(&self, order: &ServiceOrder) -> WorkOrderRepositoryResult<()>;

    /// Persists changes to an existing service order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderRepositoryError::NotFound`] when the order does
    /// not exist.
    async fn update(&self, order: &ServiceOrder) -> WorkOrderRepositoryResult<()>;

    /// Finds a service order by identifier. Returns `None` when absent.
    async fn find_by_id(
        &self,
        id: ServiceOrderId,
    ) -> WorkOrderRepositoryResult<Option<ServiceOrder>>;

    /// Returns the orders for a station, most recently updated first.
    async fn list_by_station(
        &self,
        station: StationId,
    ) -> WorkOrderRepositoryResult<Vec<ServiceOrder>>;

    /// Returns all service orders ordered by ticket number.
    async fn list(&self) -> WorkOrderRepositoryResult<Vec<ServiceOrder>>;

    /// Hard deletes a service order and its maintenance records.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderRepositoryError::NotFound`] when the order does
    /// not exist.
    async fn delete(&self, id: ServiceOrderId) -> WorkOrderRepositoryResult<()>;

    /// Hard deletes every order (and dependent maintenance record) for a
    /// station. Returns the number of orders removed.
    async fn delete_by_station(&self, station: StationId) -> WorkOrderRepositoryResult<usize>;

    /// Hard deletes every order (and dependent maintenance record) for an
    /// engineer. Returns the number of orders removed.
    async fn delete_by_engineer(&self, engineer: EngineerId) -> WorkOrderRepositoryResult<usize>;
}

/// Maintenance persistence contract.
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    /// Stores a new maintenance record.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderRepositoryError::Duplicate`] when the identifier
    /// already exists.
    async fn store(&self, maintenance: &Maintenance) -> WorkOrderRepositoryResult<()>;

    /// Persists changes to an existing maintenance record.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderRepositoryError::NotFound`] when the record does
    /// not exist.
    async fn update(&self, maintenance: &Maintenance) -> WorkOrderRepositoryResult<()>;

    /// Finds a maintenance record by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: MaintenanceId)
    -> WorkOrderRepositoryResult<Option<Maintenance>>;

    /// Finds the maintenance record for a service order, if one exists.
    async fn find_by_service_order(
        &self,
        order: ServiceOrderId,
    ) -> WorkOrderRepositoryResult<Option<Maintenance>>;

    /// Returns all maintenance records ordered by creation date.
    async fn list(&self) -> WorkOrderRepositoryResult<Vec<Maintenance>>;
}
