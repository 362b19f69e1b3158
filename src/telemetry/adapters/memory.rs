//! Thread-safe in-memory adapter for the telemetry ports.
//!
//! A single store backs both repositories so the plan-to-device cascade
//! can run under one lock, matching the transactional behavior of the
//! `PostgreSQL` adapter.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::registry::domain::StationId;
use crate::telemetry::{
    domain::{DataPlanDavis, DataPlanId, DavisStation, DavisStationId},
    ports::{
        DataPlanRepository, DavisStationRepository, TelemetryEntity, TelemetryRepositoryError,
        TelemetryRepositoryResult,
    },
};

fn lock_poisoned<T>(err: std::sync::PoisonError<T>) -> TelemetryRepositoryError {
    TelemetryRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[derive(Debug, Default)]
struct StoreState {
    plans: HashMap<DataPlanId, DataPlanDavis>,
    devices: HashMap<DavisStationId, DavisStation>,
}

/// Thread-safe in-memory telemetry store.
///
/// Implements both [`DataPlanRepository`] and [`DavisStationRepository`]
/// over shared state; cloning yields handles onto the same store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTelemetryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryTelemetryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataPlanRepository for InMemoryTelemetryStore {
    async fn store(&self, plan: &DataPlanDavis) -> TelemetryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.plans.contains_key(&plan.id()) {
            return Err(TelemetryRepositoryError::Duplicate(
                TelemetryEntity::DataPlan,
                plan.id().into_inner(),
            ));
        }
        state.plans.insert(plan.id(), plan.clone());
        Ok(())
    }

    async fn update(&self, plan: &DataPlanDavis) -> TelemetryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.plans.contains_key(&plan.id()) {
            return Err(TelemetryRepositoryError::NotFound(
                TelemetryEntity::DataPlan,
                plan.id().into_inner(),
            ));
        }
        state.plans.insert(plan.id(), plan.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: DataPlanId) -> TelemetryRepositoryResult<Option<DataPlanDavis>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.plans.get(&id).cloned())
    }

    async fn list(&self) -> TelemetryRepositoryResult<Vec<DataPlanDavis>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut plans: Vec<DataPlanDavis> = state.plans.values().cloned().collect();
        plans.sort_by(|a, b| a.code().cmp(b.code()));
        Ok(plans)
    }

    async fn delete(&self, id: DataPlanId) -> TelemetryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.plans.remove(&id).is_none() {
            return Err(TelemetryRepositoryError::NotFound(
                TelemetryEntity::DataPlan,
                id.into_inner(),
            ));
        }
        state.devices.retain(|_, device| device.plan() != id);
        Ok(())
    }
}

#[async_trait]
impl DavisStationRepository for InMemoryTelemetryStore {
    async fn store(&self, device: &DavisStation) -> TelemetryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.devices.contains_key(&device.id()) {
            return Err(TelemetryRepositoryError::Duplicate(
                TelemetryEntity::DavisStation,
                device.id().into_inner(),
            ));
        }
        state.devices.insert(device.id(), device.clone());
        Ok(())
    }

    async fn update(&self, device: &DavisStation) -> TelemetryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.devices.contains_key(&device.id()) {
            return Err(TelemetryRepositoryError::NotFound(
                TelemetryEntity::DavisStation,
                device.id().into_inner(),
            ));
        }
        state.devices.insert(device.id(), device.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: DavisStationId,
    ) -> TelemetryRepositoryResult<Option<DavisStation>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.devices.get(&id).cloned())
    }

    async fn list_by_station(
        &self,
        station: StationId,
    ) -> TelemetryRepositoryResult<Vec<DavisStation>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut devices: Vec<DavisStation> = state
            .devices
            .values()
            .filter(|device| device.station() == station)
            .cloned()
            .collect();
        devices.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(devices)
    }

    async fn list(&self) -> TelemetryRepositoryResult<Vec<DavisStation>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut devices: Vec<DavisStation> = state.devices.values().cloned().collect();
        devices.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(devices)
    }

    async fn delete(&self, id: DavisStationId) -> TelemetryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.devices.remove(&id).is_none() {
            return Err(TelemetryRepositoryError::NotFound(
                TelemetryEntity::DavisStation,
                id.into_inner(),
            ));
        }
        Ok(())
    }

    async fn delete_by_station(&self, station: StationId) -> TelemetryRepositoryResult<usize> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let before = state.devices.len();
        state.devices.retain(|_, device| device.station() != station);
        Ok(before - state.devices.len())
    }
}
