//! Thread-safe in-memory adapter for the work-order ports.
//!
//! A single store backs both repositories so the order-to-maintenance
//! cascade can run under one lock, matching the transactional behavior of
//! the `PostgreSQL` adapter.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::registry::domain::{EngineerId, StationId};
use crate::workorder::{
    domain::{Maintenance, MaintenanceId, ServiceOrder, ServiceOrderId, TicketNumber},
    ports::{
        MaintenanceRepository, ServiceOrderRepository, WorkOrderEntity, WorkOrderRepositoryError,
        WorkOrderRepositoryResult,
    },
};

fn lock_poisoned<T>(err: std::sync::PoisonError<T>) -> WorkOrderRepositoryError {
    WorkOrderRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[derive(Debug, Default)]
struct StoreState {
    orders: HashMap<ServiceOrderId, ServiceOrder>,
    maintenance: HashMap<MaintenanceId, Maintenance>,
    next_ticket: u32,
}

impl StoreState {
    fn remove_order_cascade(&mut self, id: ServiceOrderId) -> bool {
        if self.orders.remove(&id).is_none() {
            return false;
        }
        self.maintenance
            .retain(|_, record| record.service_order() != id);
        true
    }
}

/// Thread-safe in-memory work-order store.
///
/// Implements both [`ServiceOrderRepository`] and [`MaintenanceRepository`]
/// over shared state; cloning yields handles onto the same store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkOrderStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryWorkOrderStore {
    /// Creates an empty store with the ticket sequence at its origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ServiceOrderRepository for InMemoryWorkOrderStore {
    async fn next_ticket(&self) -> WorkOrderRepositoryResult<TicketNumber> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state.next_ticket += 1;
        Ok(TicketNumber::new(state.next_ticket))
    }

    async fn store(&self, order: &ServiceOrder) -> WorkOrderRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.orders.contains_key(&order.id()) {
            return Err(WorkOrderRepositoryError::Duplicate(
                WorkOrderEntity::ServiceOrder,
                order.id().into_inner(),
            ));
        }
        state.orders.insert(order.id(), order.clone());
        Ok(())
    }

    async fn update(&self, order: &ServiceOrder) -> WorkOrderRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.orders.contains_key(&order.id()) {
            return Err(WorkOrderRepositoryError::NotFound(
                WorkOrderEntity::ServiceOrder,
                order.id().into_inner(),
            ));
        }
        state.orders.insert(order.id(), order.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: ServiceOrderId,
    ) -> WorkOrderRepositoryResult<Option<ServiceOrder>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.orders.get(&id).cloned())
    }

    async fn list_by_station(
        &self,
        station: StationId,
    ) -> WorkOrderRepositoryResult<Vec<ServiceOrder>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut orders: Vec<ServiceOrder> = state
            .orders
            .values()
            .filter(|order| order.station() == station)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.update_at().cmp(&a.update_at()).then(b.ticket().cmp(&a.ticket())));
        Ok(orders)
    }

    async fn list(&self) -> WorkOrderRepositoryResult<Vec<ServiceOrder>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut orders: Vec<ServiceOrder> = state.orders.values().cloned().collect();
        orders.sort_by_key(ServiceOrder::ticket);
        Ok(orders)
    }

    async fn delete(&self, id: ServiceOrderId) -> WorkOrderRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.remove_order_cascade(id) {
            return Err(WorkOrderRepositoryError::NotFound(
                WorkOrderEntity::ServiceOrder,
                id.into_inner(),
            ));
        }
        Ok(())
    }

    async fn delete_by_station(&self, station: StationId) -> WorkOrderRepositoryResult<usize> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let doomed: Vec<ServiceOrderId> = state
            .orders
            .values()
            .filter(|order| order.station() == station)
            .map(ServiceOrder::id)
            .collect();
        for id in &doomed {
            state.remove_order_cascade(*id);
        }
        Ok(doomed.len())
    }

    async fn delete_by_engineer(&self, engineer: EngineerId) -> WorkOrderRepositoryResult<usize> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let doomed: Vec<ServiceOrderId> = state
            .orders
            .values()
            .filter(|order| order.engineer() == engineer)
            .map(ServiceOrder::id)
            .collect();
        for id in &doomed {
            state.remove_order_cascade(*id);
        }
        Ok(doomed.len())
    }
}

#[async_trait]
impl MaintenanceRepository for InMemoryWorkOrderStore {
    async fn store(&self, maintenance: &Maintenance) -> WorkOrderRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.maintenance.contains_key(&maintenance.id()) {
            return Err(WorkOrderRepositoryError::Duplicate(
                WorkOrderEntity::Maintenance,
                maintenance.id().into_inner(),
            ));
        }
        state.maintenance.insert(maintenance.id(), maintenance.clone());
        Ok(())
    }

    async fn update(&self, maintenance: &Maintenance) -> WorkOrderRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.maintenance.contains_key(&maintenance.id()) {
            return Err(WorkOrderRepositoryError::NotFound(
                WorkOrderEntity::Maintenance,
                maintenance.id().into_inner(),
            ));
        }
        state.maintenance.insert(maintenance.id(), maintenance.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: MaintenanceId,
    ) -> WorkOrderRepositoryResult<Option<Maintenance>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.maintenance.get(&id).cloned())
    }

    async fn find_by_service_order(
        &self,
        order: ServiceOrderId,
    ) -> WorkOrderRepositoryResult<Option<Maintenance>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .maintenance
            .values()
            .find(|record| record.service_order() == order)
            .cloned())
    }

    async fn list(&self) -> WorkOrderRepositoryResult<Vec<Maintenance>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut records: Vec<Maintenance> = state.maintenance.values().cloned().collect();
        records.sort_by_key(Maintenance::created_at);
        Ok(records)
    }
}
