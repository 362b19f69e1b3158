//! Cross-context cascade deletion.
//!
//! Hard deletion is reserved for decommissioning: removing a station takes
//! its service orders, maintenance records, and telemetry device links
//! with it, and removing an engineer takes their orders. Children are
//! removed before the parent so a partial failure never leaves orphaned
//! references; the soft-delete path never cascades.

use crate::registry::domain::{EngineerId, StationId};
use crate::registry::ports::{
    EngineerRepository, RegistryEntity, RegistryRepositoryError, StationRepository,
};
use crate::telemetry::domain::DataPlanId;
use crate::telemetry::ports::{
    DataPlanRepository, DavisStationRepository, TelemetryRepositoryError,
};
use crate::workorder::domain::ServiceOrderId;
use crate::workorder::ports::{ServiceOrderRepository, WorkOrderRepositoryError};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while decommissioning records.
#[derive(Debug, Error)]
pub enum DecommissionError {
    /// Registry-side deletion failed.
    #[error(transparent)]
    Registry(#[from] RegistryRepositoryError),
    /// Work-order-side deletion failed.
    #[error(transparent)]
    WorkOrder(#[from] WorkOrderRepositoryError),
    /// Telemetry-side deletion failed.
    #[error(transparent)]
    Telemetry(#[from] TelemetryRepositoryError),
}

/// Result type for decommission operations.
pub type DecommissionResult<T> = Result<T, DecommissionError>;

/// Counts of dependent records removed by a station decommission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StationDecommissionReport {
    /// Service orders removed, maintenance records included.
    pub orders_removed: usize,
    /// Telemetry device links removed.
    pub devices_removed: usize,
}

/// Orchestrates hard deletion across the registry, work-order, and
/// telemetry contexts.
pub struct DecommissionService<SR, ER, O, D, P>
where
    SR: StationRepository,
    ER: EngineerRepository,
    O: ServiceOrderRepository,
    D: DavisStationRepository,
    P: DataPlanRepository,
{
    stations: Arc<SR>,
    engineers: Arc<ER>,
    orders: Arc<O>,
    devices: Arc<D>,
    plans: Arc<P>,
}

impl<SR, ER, O, D, P> DecommissionService<SR, ER, O, D, P>
where
    SR: StationRepository,
    ER: EngineerRepository,
    O: ServiceOrderRepository,
    D: DavisStationRepository,
    P: DataPlanRepository,
{
    /// Creates a new decommission service.
    #[must_use]
    pub const fn new(
        stations: Arc<SR>,
        engineers: Arc<ER>,
        orders: Arc<O>,
        devices: Arc<D>,
        plans: Arc<P>,
    ) -> Self {
        Self {
            stations,
            engineers,
            orders,
            devices,
            plans,
        }
    }

    /// Hard deletes a station and everything that references it: device
    /// links, service orders, and (through the orders) maintenance
    /// records.
    ///
    /// # Errors
    ///
    /// Returns [`DecommissionError::Registry`] with a not-found error when
    /// the station does not exist, or another variant when a deletion
    /// step fails.
    pub async fn delete_station(
        &self,
        id: StationId,
    ) -> DecommissionResult<StationDecommissionReport> {
        if self.stations.find_by_id(id).await?.is_none() {
            return Err(
                RegistryRepositoryError::NotFound(RegistryEntity::Station, id.into_inner()).into(),
            );
        }

        let devices_removed = self.devices.delete_by_station(id).await?;
        let orders_removed = self.orders.delete_by_station(id).await?;
        self.stations.delete(id).await?;
        Ok(StationDecommissionReport {
            orders_removed,
            devices_removed,
        })
    }

    /// Hard deletes an engineer and their service orders, maintenance
    /// records included.
    ///
    /// # Errors
    ///
    /// Returns [`DecommissionError::Registry`] with a not-found error when
    /// the engineer does not exist, or another variant when a deletion
    /// step fails.
    pub async fn delete_engineer(&self, id: EngineerId) -> DecommissionResult<usize> {
        if self.engineers.find_by_id(id).await?.is_none() {
            return Err(
                RegistryRepositoryError::NotFound(RegistryEntity::Engineer, id.into_inner())
                    .into(),
            );
        }

        let orders_removed = self.orders.delete_by_engineer(id).await?;
        self.engineers.delete(id).await?;
        Ok(orders_removed)
    }

    /// Hard deletes a service order and its maintenance record.
    ///
    /// # Errors
    ///
    /// Returns [`DecommissionError::WorkOrder`] when the order does not
    /// exist or deletion fails.
    pub async fn delete_service_order(&self, id: ServiceOrderId) -> DecommissionResult<()> {
        self.orders.delete(id).await?;
        Ok(())
    }

    /// Hard deletes a data plan and the device links that transmit over
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`DecommissionError::Telemetry`] when the plan does not
    /// exist or deletion fails.
    pub async fn delete_data_plan(&self, id: DataPlanId) -> DecommissionResult<()> {
        self.plans.delete(id).await?;
        Ok(())
    }
}
