//! `PostgreSQL` repository implementation for the work-order ports.

use super::{
    models::{MaintenanceRow, ServiceOrderRow, TicketSequenceRow},
    schema::{maintenance, service_orders},
};
use crate::record::{RecordState, Timestamps};
use crate::registry::domain::{EngineerId, StationId};
use crate::workorder::{
    domain::{
        Maintenance, MaintenanceId, MaintenanceType, PersistedMaintenanceData,
        PersistedServiceOrderData, ServiceOrder, ServiceOrderId, TicketNumber,
    },
    ports::{
        MaintenanceRepository, ServiceOrderRepository, WorkOrderEntity, WorkOrderRepositoryError,
        WorkOrderRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by work-order adapters.
pub type WorkOrderPgPool = Pool<ConnectionManager<PgConnection>>;

impl From<DieselError> for WorkOrderRepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, info) => {
                Self::Conflict(info.message().to_owned())
            }
            other => Self::persistence(other),
        }
    }
}

/// `PostgreSQL`-backed work-order repository.
///
/// Serves both the service-order and maintenance ports over a shared pool;
/// the order-to-maintenance cascade is enforced by the database foreign
/// key.
#[derive(Debug, Clone)]
pub struct PostgresWorkOrderRepository {
    pool: WorkOrderPgPool,
}

impl PostgresWorkOrderRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: WorkOrderPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> WorkOrderRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> WorkOrderRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(WorkOrderRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(WorkOrderRepositoryError::persistence)?
    }
}

#[async_trait]
impl ServiceOrderRepository for PostgresWorkOrderRepository {
    async fn next_ticket(&self) -> WorkOrderRepositoryResult<TicketNumber> {
        self.run_blocking(move |connection| {
            let row = diesel::sql_query("SELECT nextval('service_order_ticket_seq') AS value")
                .get_result::<TicketSequenceRow>(connection)?;
            let value = u32::try_from(row.value).map_err(WorkOrderRepositoryError::persistence)?;
            Ok(TicketNumber::new(value))
        })
        .await
    }

    async fn store(&self, order: &ServiceOrder) -> WorkOrderRepositoryResult<()> {
        let row = order_to_row(order)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(service_orders::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| duplicate_or_other(err, WorkOrderEntity::ServiceOrder, row.id))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, order: &ServiceOrder) -> WorkOrderRepositoryResult<()> {
        let row = order_to_row(order)?;
        self.run_blocking(move |connection| {
            let affected =
                diesel::update(service_orders::table.filter(service_orders::id.eq(row.id)))
                    .set(&row)
                    .execute(connection)?;
            ensure_found(affected, WorkOrderEntity::ServiceOrder, row.id)
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: ServiceOrderId,
    ) -> WorkOrderRepositoryResult<Option<ServiceOrder>> {
        self.run_blocking(move |connection| {
            let row = service_orders::table
                .filter(service_orders::id.eq(id.into_inner()))
                .select(ServiceOrderRow::as_select())
                .first::<ServiceOrderRow>(connection)
                .optional()?;
            row.map(row_to_order).transpose()
        })
        .await
    }

    async fn list_by_station(
        &self,
        station: StationId,
    ) -> WorkOrderRepositoryResult<Vec<ServiceOrder>> {
        self.run_blocking(move |connection| {
            let rows = service_orders::table
                .filter(service_orders::station_id.eq(station.into_inner()))
                .order((service_orders::update_at.desc(), service_orders::ticket.desc()))
                .select(ServiceOrderRow::as_select())
                .load::<ServiceOrderRow>(connection)?;
            rows.into_iter().map(row_to_order).collect()
        })
        .await
    }

    async fn list(&self) -> WorkOrderRepositoryResult<Vec<ServiceOrder>> {
        self.run_blocking(move |connection| {
            let rows = service_orders::table
                .order(service_orders::ticket.asc())
                .select(ServiceOrderRow::as_select())
                .load::<ServiceOrderRow>(connection)?;
            rows.into_iter().map(row_to_order).collect()
        })
        .await
    }

    async fn delete(&self, id: ServiceOrderId) -> WorkOrderRepositoryResult<()> {
        self.run_blocking(move |connection| {
            // Maintenance rows are dropped by the database via ON DELETE
            // CASCADE on the foreign key.
            let affected =
                diesel::delete(service_orders::table.filter(service_orders::id.eq(id.into_inner())))
                    .execute(connection)?;
            ensure_found(affected, WorkOrderEntity::ServiceOrder, id.into_inner())
        })
        .await
    }

    async fn delete_by_station(&self, station: StationId) -> WorkOrderRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                service_orders::table.filter(service_orders::station_id.eq(station.into_inner())),
            )
            .execute(connection)?;
            Ok(affected)
        })
        .await
    }

    async fn delete_by_engineer(&self, engineer: EngineerId) -> WorkOrderRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                service_orders::table.filter(service_orders::engineer_id.eq(engineer.into_inner())),
            )
            .execute(connection)?;
            Ok(affected)
        })
        .await
    }
}

#[async_trait]
impl MaintenanceRepository for PostgresWorkOrderRepository {
    async fn store(&self, record: &Maintenance) -> WorkOrderRepositoryResult<()> {
        let row = maintenance_to_row(record);
        self.run_blocking(move |connection| {
            diesel::insert_into(maintenance::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| duplicate_or_other(err, WorkOrderEntity::Maintenance, row.id))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, record: &Maintenance) -> WorkOrderRepositoryResult<()> {
        let row = maintenance_to_row(record);
        self.run_blocking(move |connection| {
            let affected = diesel::update(maintenance::table.filter(maintenance::id.eq(row.id)))
                .set(&row)
                .execute(connection)?;
            ensure_found(affected, WorkOrderEntity::Maintenance, row.id)
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: MaintenanceId,
    ) -> WorkOrderRepositoryResult<Option<Maintenance>> {
        self.run_blocking(move |connection| {
            let row = maintenance::table
                .filter(maintenance::id.eq(id.into_inner()))
                .select(MaintenanceRow::as_select())
                .first::<MaintenanceRow>(connection)
                .optional()?;
            row.map(row_to_maintenance).transpose()
        })
        .await
    }

    async fn find_by_service_order(
        &self,
        order: ServiceOrderId,
    ) -> WorkOrderRepositoryResult<Option<Maintenance>> {
        self.run_blocking(move |connection| {
            let row = maintenance::table
                .filter(maintenance::service_order_id.eq(order.into_inner()))
                .select(MaintenanceRow::as_select())
                .first::<MaintenanceRow>(connection)
                .optional()?;
            row.map(row_to_maintenance).transpose()
        })
        .await
    }

    async fn list(&self) -> WorkOrderRepositoryResult<Vec<Maintenance>> {
        self.run_blocking(move |connection| {
            let rows = maintenance::table
                .order(maintenance::created_at.asc())
                .select(MaintenanceRow::as_select())
                .load::<MaintenanceRow>(connection)?;
            rows.into_iter().map(row_to_maintenance).collect()
        })
        .await
    }
}

fn duplicate_or_other(
    err: DieselError,
    entity: WorkOrderEntity,
    id: uuid::Uuid,
) -> WorkOrderRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            WorkOrderRepositoryError::Duplicate(entity, id)
        }
        other => other.into(),
    }
}

fn ensure_found(
    affected: usize,
    entity: WorkOrderEntity,
    id: uuid::Uuid,
) -> WorkOrderRepositoryResult<()> {
    if affected == 0 {
        return Err(WorkOrderRepositoryError::NotFound(entity, id));
    }
    Ok(())
}

fn order_to_row(order: &ServiceOrder) -> WorkOrderRepositoryResult<ServiceOrderRow> {
    let ticket =
        i32::try_from(order.ticket().value()).map_err(WorkOrderRepositoryError::persistence)?;
    Ok(ServiceOrderRow {
        id: order.id().into_inner(),
        ticket,
        station_id: order.station().into_inner(),
        engineer_id: order.engineer().into_inner(),
        author: order.author().to_owned(),
        execution_date: order.execution_date(),
        service_description: order.service_description().to_owned(),
        observation: order.observation().map(str::to_owned),
        active: order.state().is_active(),
        created_at: order.created_at(),
        update_at: order.update_at(),
    })
}

fn row_to_order(row: ServiceOrderRow) -> WorkOrderRepositoryResult<ServiceOrder> {
    let ticket = u32::try_from(row.ticket).map_err(WorkOrderRepositoryError::persistence)?;
    Ok(ServiceOrder::from_persisted(PersistedServiceOrderData {
        id: ServiceOrderId::from_uuid(row.id),
        ticket: TicketNumber::new(ticket),
        station: StationId::from_uuid(row.station_id),
        engineer: EngineerId::from_uuid(row.engineer_id),
        author: row.author,
        execution_date: row.execution_date,
        service_description: row.service_description,
        observation: row.observation,
        state: RecordState::from_bool(row.active),
        stamps: Timestamps::from_persisted(row.created_at, row.update_at),
    }))
}

fn maintenance_to_row(record: &Maintenance) -> MaintenanceRow {
    MaintenanceRow {
        id: record.id().into_inner(),
        service_order_id: record.service_order().into_inner(),
        type_maintenance: record.type_maintenance().code().to_owned(),
        next_maintenance: record.next_maintenance(),
        active: record.state().is_active(),
        created_at: record.created_at(),
        update_at: record.update_at(),
    }
}

fn row_to_maintenance(row: MaintenanceRow) -> WorkOrderRepositoryResult<Maintenance> {
    let type_maintenance = MaintenanceType::try_from(row.type_maintenance.as_str())
        .map_err(WorkOrderRepositoryError::persistence)?;
    Ok(Maintenance::from_persisted(PersistedMaintenanceData {
        id: MaintenanceId::from_uuid(row.id),
        service_order: ServiceOrderId::from_uuid(row.service_order_id),
        type_maintenance,
        next_maintenance: row.next_maintenance,
        state: RecordState::from_bool(row.active),
        stamps: Timestamps::from_persisted(row.created_at, row.update_at),
    }))
}
