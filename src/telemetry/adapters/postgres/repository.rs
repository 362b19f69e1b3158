//! `PostgreSQL` repository implementation for the telemetry ports.

use super::{
    models::{DataPlanRow, DavisStationRow},
    schema::{data_plans, davis_stations},
};
use crate::record::{RecordState, Timestamps};
use crate::registry::domain::{IdentityRef, StationId};
use crate::telemetry::{
    domain::{
        DataPlanDavis, DataPlanId, DavisStation, DavisStationId, PersistedDataPlanData,
        PersistedDavisStationData,
    },
    ports::{
        DataPlanRepository, DavisStationRepository, TelemetryEntity, TelemetryRepositoryError,
        TelemetryRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by telemetry adapters.
pub type TelemetryPgPool = Pool<ConnectionManager<PgConnection>>;

impl From<DieselError> for TelemetryRepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, info) => {
                Self::Conflict(info.message().to_owned())
            }
            other => Self::persistence(other),
        }
    }
}

/// `PostgreSQL`-backed telemetry repository.
///
/// Serves both the data-plan and device-link ports over a shared pool;
/// the plan-to-device cascade is enforced by the database foreign key.
#[derive(Debug, Clone)]
pub struct PostgresTelemetryRepository {
    pool: TelemetryPgPool,
}

impl PostgresTelemetryRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TelemetryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TelemetryRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TelemetryRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TelemetryRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TelemetryRepositoryError::persistence)?
    }
}

#[async_trait]
impl DataPlanRepository for PostgresTelemetryRepository {
    async fn store(&self, plan: &DataPlanDavis) -> TelemetryRepositoryResult<()> {
        let row = plan_to_row(plan);
        self.run_blocking(move |connection| {
            diesel::insert_into(data_plans::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| duplicate_or_other(err, TelemetryEntity::DataPlan, row.id))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, plan: &DataPlanDavis) -> TelemetryRepositoryResult<()> {
        let row = plan_to_row(plan);
        self.run_blocking(move |connection| {
            let affected = diesel::update(data_plans::table.filter(data_plans::id.eq(row.id)))
                .set(&row)
                .execute(connection)?;
            ensure_found(affected, TelemetryEntity::DataPlan, row.id)
        })
        .await
    }

    async fn find_by_id(&self, id: DataPlanId) -> TelemetryRepositoryResult<Option<DataPlanDavis>> {
        self.run_blocking(move |connection| {
            let row = data_plans::table
                .filter(data_plans::id.eq(id.into_inner()))
                .select(DataPlanRow::as_select())
                .first::<DataPlanRow>(connection)
                .optional()?;
            Ok(row.map(row_to_plan))
        })
        .await
    }

    async fn list(&self) -> TelemetryRepositoryResult<Vec<DataPlanDavis>> {
        self.run_blocking(move |connection| {
            let rows = data_plans::table
                .order(data_plans::code.asc())
                .select(DataPlanRow::as_select())
                .load::<DataPlanRow>(connection)?;
            Ok(rows.into_iter().map(row_to_plan).collect())
        })
        .await
    }

    async fn delete(&self, id: DataPlanId) -> TelemetryRepositoryResult<()> {
        self.run_blocking(move |connection| {
            // Device links are dropped by the database via ON DELETE
            // CASCADE on the foreign key.
            let affected =
                diesel::delete(data_plans::table.filter(data_plans::id.eq(id.into_inner())))
                    .execute(connection)?;
            ensure_found(affected, TelemetryEntity::DataPlan, id.into_inner())
        })
        .await
    }
}

#[async_trait]
impl DavisStationRepository for PostgresTelemetryRepository {
    async fn store(&self, device: &DavisStation) -> TelemetryRepositoryResult<()> {
        let row = device_to_row(device);
        self.run_blocking(move |connection| {
            diesel::insert_into(davis_stations::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| duplicate_or_other(err, TelemetryEntity::DavisStation, row.id))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, device: &DavisStation) -> TelemetryRepositoryResult<()> {
        let row = device_to_row(device);
        self.run_blocking(move |connection| {
            let affected =
                diesel::update(davis_stations::table.filter(davis_stations::id.eq(row.id)))
                    .set(&row)
                    .execute(connection)?;
            ensure_found(affected, TelemetryEntity::DavisStation, row.id)
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: DavisStationId,
    ) -> TelemetryRepositoryResult<Option<DavisStation>> {
        self.run_blocking(move |connection| {
            let row = davis_stations::table
                .filter(davis_stations::id.eq(id.into_inner()))
                .select(DavisStationRow::as_select())
                .first::<DavisStationRow>(connection)
                .optional()?;
            Ok(row.map(row_to_device))
        })
        .await
    }

    async fn list_by_station(
        &self,
        station: StationId,
    ) -> TelemetryRepositoryResult<Vec<DavisStation>> {
        self.run_blocking(move |connection| {
            let rows = davis_stations::table
                .filter(davis_stations::station_id.eq(station.into_inner()))
                .order(davis_stations::name.asc())
                .select(DavisStationRow::as_select())
                .load::<DavisStationRow>(connection)?;
            Ok(rows.into_iter().map(row_to_device).collect())
        })
        .await
    }

    async fn list(&self) -> TelemetryRepositoryResult<Vec<DavisStation>> {
        self.run_blocking(move |connection| {
            let rows = davis_stations::table
                .order(davis_stations::name.asc())
                .select(DavisStationRow::as_select())
                .load::<DavisStationRow>(connection)?;
            Ok(rows.into_iter().map(row_to_device).collect())
        })
        .await
    }

    async fn delete(&self, id: DavisStationId) -> TelemetryRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected =
                diesel::delete(davis_stations::table.filter(davis_stations::id.eq(id.into_inner())))
                    .execute(connection)?;
            ensure_found(affected, TelemetryEntity::DavisStation, id.into_inner())
        })
        .await
    }

    async fn delete_by_station(&self, station: StationId) -> TelemetryRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                davis_stations::table.filter(davis_stations::station_id.eq(station.into_inner())),
            )
            .execute(connection)?;
            Ok(affected)
        })
        .await
    }
}

fn duplicate_or_other(
    err: DieselError,
    entity: TelemetryEntity,
    id: uuid::Uuid,
) -> TelemetryRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            TelemetryRepositoryError::Duplicate(entity, id)
        }
        other => other.into(),
    }
}

fn ensure_found(
    affected: usize,
    entity: TelemetryEntity,
    id: uuid::Uuid,
) -> TelemetryRepositoryResult<()> {
    if affected == 0 {
        return Err(TelemetryRepositoryError::NotFound(entity, id));
    }
    Ok(())
}

fn plan_to_row(plan: &DataPlanDavis) -> DataPlanRow {
    DataPlanRow {
        id: plan.id().into_inner(),
        code: plan.code().to_owned(),
        reference: plan.reference().to_owned(),
        start_date: plan.start_date(),
        expire: plan.expire(),
        active: plan.state().is_active(),
        created_at: plan.created_at(),
        update_at: plan.update_at(),
    }
}

fn row_to_plan(row: DataPlanRow) -> DataPlanDavis {
    DataPlanDavis::from_persisted(PersistedDataPlanData {
        id: DataPlanId::from_uuid(row.id),
        code: row.code,
        reference: row.reference,
        start_date: row.start_date,
        expire: row.expire,
        state: RecordState::from_bool(row.active),
        stamps: Timestamps::from_persisted(row.created_at, row.update_at),
    })
}

fn device_to_row(device: &DavisStation) -> DavisStationRow {
    DavisStationRow {
        id: device.id().into_inner(),
        station_id: device.station().into_inner(),
        plan_id: device.plan().into_inner(),
        name: device.name().to_owned(),
        did: device.did().to_owned(),
        key: device.key().to_owned(),
        af: device.af().map(str::to_owned),
        observation: device.observation().to_owned(),
        modifier_user: device.modifier_user().into_inner(),
        active: device.state().is_active(),
        created_at: device.created_at(),
        update_at: device.update_at(),
    }
}

fn row_to_device(row: DavisStationRow) -> DavisStation {
    DavisStation::from_persisted(PersistedDavisStationData {
        id: DavisStationId::from_uuid(row.id),
        station: StationId::from_uuid(row.station_id),
        plan: DataPlanId::from_uuid(row.plan_id),
        name: row.name,
        did: row.did,
        key: row.key,
        af: row.af,
        observation: row.observation,
        modifier_user: IdentityRef::from_uuid(row.modifier_user),
        state: RecordState::from_bool(row.active),
        stamps: Timestamps::from_persisted(row.created_at, row.update_at),
    })
}
