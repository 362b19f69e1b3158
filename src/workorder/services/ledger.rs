//! Service-order ledger: opening, closing, and annotating orders.

use crate::registry::domain::{EngineerId, StationId};
use crate::registry::ports::{
    EngineerRepository, ProjectRepository, RegistryRepositoryError, StationRepository,
};
use crate::registry::services::labels::station_label;
use crate::workorder::{
    domain::{NewServiceOrder, ServiceOrder, ServiceOrderId, WorkOrderDomainError},
    ports::{Localizer, ServiceOrderRepository, WorkOrderEntity, WorkOrderRepositoryError},
    services::labels::service_order_label,
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Service-level errors for work-order operations.
#[derive(Debug, Error)]
pub enum WorkOrderServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] WorkOrderDomainError),
    /// Work-order repository operation failed.
    #[error(transparent)]
    Repository(#[from] WorkOrderRepositoryError),
    /// Registry lookup failed.
    #[error(transparent)]
    Registry(#[from] RegistryRepositoryError),
    /// A referenced record does not exist.
    #[error("referenced {entity} does not exist: {id}")]
    MissingReference {
        /// Kind of the missing record.
        entity: &'static str,
        /// Identifier that failed to resolve.
        id: Uuid,
    },
    /// The service order already has a maintenance record.
    #[error("service order already has a maintenance record: {0}")]
    MaintenanceAlreadyRecorded(Uuid),
}

/// Result type for work-order service operations.
pub type WorkOrderServiceResult<T> = Result<T, WorkOrderServiceError>;

/// Request payload for opening a service order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenServiceOrderRequest {
    station: StationId,
    engineer: EngineerId,
    author: String,
    execution_date: NaiveDate,
    service_description: String,
    observation: Option<String>,
}

impl OpenServiceOrderRequest {
    /// Creates a request with required order fields.
    #[must_use]
    pub fn new(
        station: StationId,
        engineer: EngineerId,
        author: impl Into<String>,
        execution_date: NaiveDate,
        service_description: impl Into<String>,
    ) -> Self {
        Self {
            station,
            engineer,
            author: author.into(),
            execution_date,
            service_description: service_description.into(),
            observation: None,
        }
    }

    /// Sets the free-form observation.
    #[must_use]
    pub fn with_observation(mut self, observation: impl Into<String>) -> Self {
        self.observation = Some(observation.into());
        self
    }
}

/// Service-order ledger orchestration service.
pub struct ServiceOrderLedgerService<O, SR, PR, ER, C>
where
    O: ServiceOrderRepository,
    SR: StationRepository,
    PR: ProjectRepository,
    ER: EngineerRepository,
    C: Clock + Send + Sync,
{
    orders: Arc<O>,
    stations: Arc<SR>,
    projects: Arc<PR>,
    engineers: Arc<ER>,
    localizer: Arc<dyn Localizer>,
    clock: Arc<C>,
}

impl<O, SR, PR, ER, C> ServiceOrderLedgerService<O, SR, PR, ER, C>
where
    O: ServiceOrderRepository,
    SR: StationRepository,
    PR: ProjectRepository,
    ER: EngineerRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new ledger service.
    #[must_use]
    pub fn new(
        orders: Arc<O>,
        stations: Arc<SR>,
        projects: Arc<PR>,
        engineers: Arc<ER>,
        localizer: Arc<dyn Localizer>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            orders,
            stations,
            projects,
            engineers,
            localizer,
            clock,
        }
    }

    /// Opens a new service order against a station.
    ///
    /// The station and engineer references must resolve; the ticket number
    /// is drawn from the repository sequence.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderServiceError::MissingReference`] when the station
    /// or engineer does not exist, and other variants when validation or
    /// persistence fails.
    pub async fn open(
        &self,
        request: OpenServiceOrderRequest,
    ) -> WorkOrderServiceResult<ServiceOrder> {
        if self.stations.find_by_id(request.station).await?.is_none() {
            return Err(WorkOrderServiceError::MissingReference {
                entity: "station",
                id: request.station.into_inner(),
            });
        }
        if self.engineers.find_by_id(request.engineer).await?.is_none() {
            return Err(WorkOrderServiceError::MissingReference {
                entity: "engineer",
                id: request.engineer.into_inner(),
            });
        }

        let ticket = self.orders.next_ticket().await?;
        let order = ServiceOrder::new(
            NewServiceOrder {
                ticket,
                station: request.station,
                engineer: request.engineer,
                author: request.author,
                execution_date: request.execution_date,
                service_description: request.service_description,
                observation: request.observation,
            },
            &*self.clock,
        )?;
        self.orders.store(&order).await?;
        Ok(order)
    }

    /// Finds a service order by identifier. Returns `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(
        &self,
        id: ServiceOrderId,
    ) -> WorkOrderServiceResult<Option<ServiceOrder>> {
        Ok(self.orders.find_by_id(id).await?)
    }

    /// Returns all service orders ordered by ticket number.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self) -> WorkOrderServiceResult<Vec<ServiceOrder>> {
        Ok(self.orders.list().await?)
    }

    /// Returns the orders for a station, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_by_station(
        &self,
        station: StationId,
    ) -> WorkOrderServiceResult<Vec<ServiceOrder>> {
        Ok(self.orders.list_by_station(station).await?)
    }

    /// Closes an open order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderServiceError`] when the order is missing or
    /// persistence fails.
    pub async fn close(&self, id: ServiceOrderId) -> WorkOrderServiceResult<ServiceOrder> {
        let mut order = self.require(id).await?;
        order.close(&*self.clock);
        self.orders.update(&order).await?;
        Ok(order)
    }

    /// Reopens a closed order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderServiceError`] when the order is missing or
    /// persistence fails.
    pub async fn reopen(&self, id: ServiceOrderId) -> WorkOrderServiceResult<ServiceOrder> {
        let mut order = self.require(id).await?;
        order.reopen(&*self.clock);
        self.orders.update(&order).await?;
        Ok(order)
    }

    /// Replaces an order's free-form observation.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderServiceError`] when the order is missing or the
    /// new value fails validation.
    pub async fn annotate(
        &self,
        id: ServiceOrderId,
        observation: Option<String>,
    ) -> WorkOrderServiceResult<ServiceOrder> {
        let mut order = self.require(id).await?;
        order.annotate(observation, &*self.clock)?;
        self.orders.update(&order).await?;
        Ok(order)
    }

    /// Replaces an order's service description.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderServiceError`] when the order is missing or the
    /// new value fails validation.
    pub async fn revise_description(
        &self,
        id: ServiceOrderId,
        service_description: impl Into<String> + Send,
    ) -> WorkOrderServiceResult<ServiceOrder> {
        let mut order = self.require(id).await?;
        order.revise_description(service_description, &*self.clock)?;
        self.orders.update(&order).await?;
        Ok(order)
    }

    /// Resolves the display label for an order:
    /// `<code> | <station label> | <state>`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderServiceError::MissingReference`] when the order's
    /// station has gone missing.
    pub async fn label(&self, id: ServiceOrderId) -> WorkOrderServiceResult<String> {
        let order = self.require(id).await?;
        let station = self.stations.find_by_id(order.station()).await?.ok_or(
            WorkOrderServiceError::MissingReference {
                entity: "station",
                id: order.station().into_inner(),
            },
        )?;
        let mut projects = Vec::with_capacity(station.projects().len());
        for project_id in station.projects() {
            let project = self.projects.find_by_id(*project_id).await?.ok_or(
                WorkOrderServiceError::MissingReference {
                    entity: "project",
                    id: project_id.into_inner(),
                },
            )?;
            projects.push(project);
        }
        let station_text = station_label(&station, &projects);
        Ok(service_order_label(&order, &station_text, &*self.localizer))
    }

    async fn require(&self, id: ServiceOrderId) -> WorkOrderServiceResult<ServiceOrder> {
        self.orders.find_by_id(id).await?.ok_or_else(|| {
            WorkOrderRepositoryError::NotFound(WorkOrderEntity::ServiceOrder, id.into_inner())
                .into()
        })
    }
}
