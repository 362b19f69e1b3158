//! Data-plan lifecycle and device-link orchestration.

use crate::registry::domain::{IdentityRef, StationId};
use crate::registry::ports::{RegistryRepositoryError, StationRepository};
use crate::telemetry::{
    domain::{
        DataPlanDavis, DataPlanId, DavisStation, DavisStationId, NewDavisStation,
        TelemetryDomainError, expiry_date,
    },
    ports::{
        DataPlanRepository, DavisStationRepository, TelemetryEntity, TelemetryRepositoryError,
    },
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Service-level errors for telemetry operations.
#[derive(Debug, Error)]
pub enum TelemetryServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TelemetryDomainError),
    /// Telemetry repository operation failed.
    #[error(transparent)]
    Repository(#[from] TelemetryRepositoryError),
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
}

/// Result type for telemetry service operations.
pub type TelemetryServiceResult<T> = Result<T, TelemetryServiceError>;

/// Data-plan orchestration service.
#[derive(Clone)]
pub struct DataPlanService<P, C>
where
    P: DataPlanRepository,
    C: Clock + Send + Sync,
{
    plans: Arc<P>,
    clock: Arc<C>,
}

impl<P, C> DataPlanService<P, C>
where
    P: DataPlanRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new data-plan service.
    #[must_use]
    pub const fn new(plans: Arc<P>, clock: Arc<C>) -> Self {
        Self { plans, clock }
    }

    /// Registers a new data plan starting on the given date.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryServiceError`] when validation fails or the
    /// repository rejects persistence.
    pub async fn register(
        &self,
        code: impl Into<String> + Send,
        reference: impl Into<String> + Send,
        start_date: NaiveDate,
    ) -> TelemetryServiceResult<DataPlanDavis> {
        let plan = DataPlanDavis::new(code, reference, start_date, &*self.clock)?;
        self.plans.store(&plan).await?;
        Ok(plan)
    }

    /// Finds a data plan by identifier. Returns `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(
        &self,
        id: DataPlanId,
    ) -> TelemetryServiceResult<Option<DataPlanDavis>> {
        Ok(self.plans.find_by_id(id).await?)
    }

    /// Returns all data plans ordered by code.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self) -> TelemetryServiceResult<Vec<DataPlanDavis>> {
        Ok(self.plans.list().await?)
    }

    /// Computes and stores the plan's expiry date.
    ///
    /// The expiry is the start date plus the fixed validity window.
    /// Recomputing is idempotent: the same start date always yields the
    /// same expiry.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryServiceError`] when the plan is missing or
    /// persistence fails.
    pub async fn compute_plan_expiry(&self, id: DataPlanId) -> TelemetryServiceResult<NaiveDate> {
        let mut plan = self.require(id).await?;
        let expire = expiry_date(plan.start_date());
        plan.mark_expiry(expire, &*self.clock);
        self.plans.update(&plan).await?;
        Ok(expire)
    }

    /// Restarts a plan from a new start date, clearing the stored expiry.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryServiceError`] when the plan is missing or
    /// persistence fails.
    pub async fn restart(
        &self,
        id: DataPlanId,
        start_date: NaiveDate,
    ) -> TelemetryServiceResult<DataPlanDavis> {
        let mut plan = self.require(id).await?;
        plan.restart(start_date, &*self.clock);
        self.plans.update(&plan).await?;
        Ok(plan)
    }

    /// Soft deletes a plan. No referencing record is affected.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryServiceError`] when the plan is missing or
    /// persistence fails.
    pub async fn deactivate(&self, id: DataPlanId) -> TelemetryServiceResult<DataPlanDavis> {
        let mut plan = self.require(id).await?;
        plan.deactivate(&*self.clock);
        self.plans.update(&plan).await?;
        Ok(plan)
    }

    /// Restores a soft-deleted plan.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryServiceError`] when the plan is missing or
    /// persistence fails.
    pub async fn activate(&self, id: DataPlanId) -> TelemetryServiceResult<DataPlanDavis> {
        let mut plan = self.require(id).await?;
        plan.activate(&*self.clock);
        self.plans.update(&plan).await?;
        Ok(plan)
    }

    async fn require(&self, id: DataPlanId) -> TelemetryServiceResult<DataPlanDavis> {
        self.plans.find_by_id(id).await?.ok_or_else(|| {
            TelemetryRepositoryError::NotFound(TelemetryEntity::DataPlan, id.into_inner()).into()
        })
    }
}

/// Request payload for linking a telemetry device to a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDeviceRequest {
    station: StationId,
    plan: DataPlanId,
    name: String,
    did: String,
    key: String,
    af: Option<String>,
    observation: String,
    modifier_user: IdentityRef,
}

impl LinkDeviceRequest {
    /// Creates a request with required link fields.
    #[must_use]
    pub fn new(
        station: StationId,
        plan: DataPlanId,
        name: impl Into<String>,
        did: impl Into<String>,
        key: impl Into<String>,
        observation: impl Into<String>,
        modifier_user: IdentityRef,
    ) -> Self {
        Self {
            station,
            plan,
            name: name.into(),
            did: did.into(),
            key: key.into(),
            af: None,
            observation: observation.into(),
            modifier_user,
        }
    }

    /// Sets the additional firmware field.
    #[must_use]
    pub fn with_af(mut self, af: impl Into<String>) -> Self {
        self.af = Some(af.into());
        self
    }
}

/// Device-link orchestration service.
pub struct DavisLinkService<D, P, SR, C>
where
    D: DavisStationRepository,
    P: DataPlanRepository,
    SR: StationRepository,
    C: Clock + Send + Sync,
{
    devices: Arc<D>,
    plans: Arc<P>,
    stations: Arc<SR>,
    clock: Arc<C>,
}

impl<D, P, SR, C> DavisLinkService<D, P, SR, C>
where
    D: DavisStationRepository,
    P: DataPlanRepository,
    SR: StationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new device-link service.
    #[must_use]
    pub const fn new(devices: Arc<D>, plans: Arc<P>, stations: Arc<SR>, clock: Arc<C>) -> Self {
        Self {
            devices,
            plans,
            stations,
            clock,
        }
    }

    /// Links a telemetry device to a station and data plan.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryServiceError::MissingReference`] when the station
    /// or plan does not exist, and other variants when validation or
    /// persistence fails.
    pub async fn link(&self, request: LinkDeviceRequest) -> TelemetryServiceResult<DavisStation> {
        if self.stations.find_by_id(request.station).await?.is_none() {
            return Err(TelemetryServiceError::MissingReference {
                entity: "station",
                id: request.station.into_inner(),
            });
        }
        if self.plans.find_by_id(request.plan).await?.is_none() {
            return Err(TelemetryServiceError::MissingReference {
                entity: "data plan",
                id: request.plan.into_inner(),
            });
        }

        let device = DavisStation::new(
            NewDavisStation {
                station: request.station,
                plan: request.plan,
                name: request.name,
                did: request.did,
                key: request.key,
                af: request.af,
                observation: request.observation,
                modifier_user: request.modifier_user,
            },
            &*self.clock,
        )?;
        self.devices.store(&device).await?;
        Ok(device)
    }

    /// Finds a device link by identifier. Returns `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(
        &self,
        id: DavisStationId,
    ) -> TelemetryServiceResult<Option<DavisStation>> {
        Ok(self.devices.find_by_id(id).await?)
    }

    /// Returns the device links installed at a station.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_by_station(
        &self,
        station: StationId,
    ) -> TelemetryServiceResult<Vec<DavisStation>> {
        Ok(self.devices.list_by_station(station).await?)
    }

    /// Returns all device links ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self) -> TelemetryServiceResult<Vec<DavisStation>> {
        Ok(self.devices.list().await?)
    }

    /// Moves a device onto another data plan.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryServiceError::MissingReference`] when the plan
    /// does not exist.
    pub async fn switch_plan(
        &self,
        id: DavisStationId,
        plan: DataPlanId,
        modifier_user: IdentityRef,
    ) -> TelemetryServiceResult<DavisStation> {
        if self.plans.find_by_id(plan).await?.is_none() {
            return Err(TelemetryServiceError::MissingReference {
                entity: "data plan",
                id: plan.into_inner(),
            });
        }
        let mut device = self.require(id).await?;
        device.switch_plan(plan, modifier_user, &*self.clock);
        self.devices.update(&device).await?;
        Ok(device)
    }

    /// Replaces a device's hardware fields.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryServiceError`] when the link is missing or a new
    /// value fails validation.
    pub async fn update_hardware(
        &self,
        id: DavisStationId,
        name: impl Into<String> + Send,
        did: impl Into<String> + Send,
        key: impl Into<String> + Send,
        af: Option<String>,
        modifier_user: IdentityRef,
    ) -> TelemetryServiceResult<DavisStation> {
        let mut device = self.require(id).await?;
        device.update_hardware(name, did, key, af, modifier_user, &*self.clock)?;
        self.devices.update(&device).await?;
        Ok(device)
    }

    /// Replaces a device's installation observation.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryServiceError`] when the link is missing or the
    /// new value fails validation.
    pub async fn annotate(
        &self,
        id: DavisStationId,
        observation: impl Into<String> + Send,
        modifier_user: IdentityRef,
    ) -> TelemetryServiceResult<DavisStation> {
        let mut device = self.require(id).await?;
        device.annotate(observation, modifier_user, &*self.clock)?;
        self.devices.update(&device).await?;
        Ok(device)
    }

    /// Soft deletes a device link.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryServiceError`] when the link is missing or
    /// persistence fails.
    pub async fn deactivate(&self, id: DavisStationId) -> TelemetryServiceResult<DavisStation> {
        let mut device = self.require(id).await?;
        device.deactivate(&*self.clock);
        self.devices.update(&device).await?;
        Ok(device)
    }

    /// Restores a soft-deleted device link.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryServiceError`] when the link is missing or
    /// persistence fails.
    pub async fn activate(&self, id: DavisStationId) -> TelemetryServiceResult<DavisStation> {
        let mut device = self.require(id).await?;
        device.activate(&*self.clock);
        self.devices.update(&device).await?;
        Ok(device)
    }

    async fn require(&self, id: DavisStationId) -> TelemetryServiceResult<DavisStation> {
        self.devices.find_by_id(id).await?.ok_or_else(|| {
            TelemetryRepositoryError::NotFound(TelemetryEntity::DavisStation, id.into_inner())
                .into()
        })
    }
}
