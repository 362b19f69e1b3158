//! Maintenance recording and due-date scheduling.

use super::ledger::{WorkOrderServiceError, WorkOrderServiceResult};
use crate::registry::ports::StationRepository;
use crate::workorder::{
    domain::{
        Maintenance, MaintenanceId, MaintenanceType, ServiceOrderId, next_due_date,
    },
    ports::{
        MaintenanceRepository, ServiceOrderRepository, WorkOrderEntity, WorkOrderRepositoryError,
    },
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;

/// Maintenance scheduling orchestration service.
///
/// Records the maintenance performed during a service order and computes
/// the next due date from the station's maintenance frequency.
pub struct MaintenanceSchedulingService<M, O, SR, C>
where
    M: MaintenanceRepository,
    O: ServiceOrderRepository,
    SR: StationRepository,
    C: Clock + Send + Sync,
{
    maintenance: Arc<M>,
    orders: Arc<O>,
    stations: Arc<SR>,
    clock: Arc<C>,
}

impl<M, O, SR, C> MaintenanceSchedulingService<M, O, SR, C>
where
    M: MaintenanceRepository,
    O: ServiceOrderRepository,
    SR: StationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new scheduling service.
    #[must_use]
    pub const fn new(maintenance: Arc<M>, orders: Arc<O>, stations: Arc<SR>, clock: Arc<C>) -> Self {
        Self {
            maintenance,
            orders,
            stations,
            clock,
        }
    }

    /// Records the maintenance performed during a service order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderServiceError::MissingReference`] when the order
    /// does not exist and
    /// [`WorkOrderServiceError::MaintenanceAlreadyRecorded`] when the order
    /// already has a maintenance record.
    pub async fn record(
        &self,
        order: ServiceOrderId,
        type_maintenance: MaintenanceType,
    ) -> WorkOrderServiceResult<Maintenance> {
        if self.orders.find_by_id(order).await?.is_none() {
            return Err(WorkOrderServiceError::MissingReference {
                entity: "service order",
                id: order.into_inner(),
            });
        }
        if self.maintenance.find_by_service_order(order).await?.is_some() {
            return Err(WorkOrderServiceError::MaintenanceAlreadyRecorded(
                order.into_inner(),
            ));
        }

        let record = Maintenance::new(order, type_maintenance, &*self.clock);
        self.maintenance.store(&record).await?;
        Ok(record)
    }

    /// Finds a maintenance record by identifier. Returns `Ok(None)` when
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(
        &self,
        id: MaintenanceId,
    ) -> WorkOrderServiceResult<Option<Maintenance>> {
        Ok(self.maintenance.find_by_id(id).await?)
    }

    /// Finds the maintenance record for a service order, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_service_order(
        &self,
        order: ServiceOrderId,
    ) -> WorkOrderServiceResult<Option<Maintenance>> {
        Ok(self.maintenance.find_by_service_order(order).await?)
    }

    /// Returns all maintenance records ordered by creation date.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self) -> WorkOrderServiceResult<Vec<Maintenance>> {
        Ok(self.maintenance.list().await?)
    }

    /// Reclassifies a maintenance record's type.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderServiceError`] when the record is missing or
    /// persistence fails.
    pub async fn reclassify(
        &self,
        id: MaintenanceId,
        type_maintenance: MaintenanceType,
    ) -> WorkOrderServiceResult<Maintenance> {
        let mut record = self.require(id).await?;
        record.reclassify(type_maintenance, &*self.clock);
        self.maintenance.update(&record).await?;
        Ok(record)
    }

    /// Computes and stores the next maintenance due date.
    ///
    /// The due date is the order's execution date plus thirty days per
    /// frequency month of the station. Recomputing is idempotent: the same
    /// inputs always yield the same date.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderServiceError::MissingReference`] when the owning
    /// order or its station has gone missing.
    pub async fn compute_next_maintenance(
        &self,
        id: MaintenanceId,
    ) -> WorkOrderServiceResult<NaiveDate> {
        let mut record = self.require(id).await?;
        let order = self.orders.find_by_id(record.service_order()).await?.ok_or(
            WorkOrderServiceError::MissingReference {
                entity: "service order",
                id: record.service_order().into_inner(),
            },
        )?;
        let station = self.stations.find_by_id(order.station()).await?.ok_or(
            WorkOrderServiceError::MissingReference {
                entity: "station",
                id: order.station().into_inner(),
            },
        )?;

        let due = next_due_date(order.execution_date(), station.maintenance_frequency());
        record.schedule_next(due, &*self.clock);
        self.maintenance.update(&record).await?;
        Ok(due)
    }

    async fn require(&self, id: MaintenanceId) -> WorkOrderServiceResult<Maintenance> {
        self.maintenance.find_by_id(id).await?.ok_or_else(|| {
            WorkOrderRepositoryError::NotFound(WorkOrderEntity::Maintenance, id.into_inner()).into()
        })
    }
}
