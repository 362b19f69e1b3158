//! `PostgreSQL` repository implementation for the registry ports.

use super::{
    models::{ClientRow, EngineerRow, ProjectRow, StationClientRow, StationProjectRow, StationRow},
    schema::{clients, engineers, projects, station_clients, station_projects, stations},
};
use crate::record::{RecordState, Timestamps};
use crate::registry::{
    domain::{
        Client, ClientId, Coordinates, Engineer, EngineerId, IdentityRef, MaintenanceFrequency,
        PersistedClientData, PersistedEngineerData, PersistedProjectData, PersistedStationData,
        PipelineSystem, Project, ProjectId, Station, StationId,
    },
    ports::{
        ClientRepository, EngineerRepository, ProjectRepository, RegistryEntity,
        RegistryRepositoryError, RegistryRepositoryResult, StationRepository,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by registry adapters.
pub type RegistryPgPool = Pool<ConnectionManager<PgConnection>>;

impl From<DieselError> for RegistryRepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, info) => {
                Self::Conflict(info.message().to_owned())
            }
            other => Self::persistence(other),
        }
    }
}

/// `PostgreSQL`-backed registry repository.
///
/// One repository serves all four registry aggregates over a shared pool;
/// the join tables are written in the same transaction as the owning
/// station row.
#[derive(Debug, Clone)]
pub struct PostgresRegistryRepository {
    pool: RegistryPgPool,
}

impl PostgresRegistryRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: RegistryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> RegistryRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RegistryRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RegistryRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RegistryRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresRegistryRepository {
    async fn store(&self, project: &Project) -> RegistryRepositoryResult<()> {
        let row = project_to_row(project);
        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| duplicate_or_other(err, RegistryEntity::Project, row.id))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, project: &Project) -> RegistryRepositoryResult<()> {
        let row = project_to_row(project);
        self.run_blocking(move |connection| {
            let affected = diesel::update(projects::table.filter(projects::id.eq(row.id)))
                .set(&row)
                .execute(connection)?;
            ensure_found(affected, RegistryEntity::Project, row.id)
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> RegistryRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()?;
            Ok(row.map(row_to_project))
        })
        .await
    }

    async fn list(&self) -> RegistryRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .order(projects::name.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)?;
            Ok(rows.into_iter().map(row_to_project).collect())
        })
        .await
    }
}

#[async_trait]
impl ClientRepository for PostgresRegistryRepository {
    async fn store(&self, client: &Client) -> RegistryRepositoryResult<()> {
        let row = client_to_row(client);
        self.run_blocking(move |connection| {
            diesel::insert_into(clients::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| duplicate_or_other(err, RegistryEntity::Client, row.id))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, client: &Client) -> RegistryRepositoryResult<()> {
        let row = client_to_row(client);
        self.run_blocking(move |connection| {
            let affected = diesel::update(clients::table.filter(clients::id.eq(row.id)))
                .set(&row)
                .execute(connection)?;
            ensure_found(affected, RegistryEntity::Client, row.id)
        })
        .await
    }

    async fn find_by_id(&self, id: ClientId) -> RegistryRepositoryResult<Option<Client>> {
        self.run_blocking(move |connection| {
            let row = clients::table
                .filter(clients::id.eq(id.into_inner()))
                .select(ClientRow::as_select())
                .first::<ClientRow>(connection)
                .optional()?;
            Ok(row.map(row_to_client))
        })
        .await
    }

    async fn list(&self) -> RegistryRepositoryResult<Vec<Client>> {
        self.run_blocking(move |connection| {
            let rows = clients::table
                .order(clients::name.asc())
                .select(ClientRow::as_select())
                .load::<ClientRow>(connection)?;
            Ok(rows.into_iter().map(row_to_client).collect())
        })
        .await
    }
}

#[async_trait]
impl EngineerRepository for PostgresRegistryRepository {
    async fn store(&self, engineer: &Engineer) -> RegistryRepositoryResult<()> {
        let row = engineer_to_row(engineer);
        self.run_blocking(move |connection| {
            diesel::insert_into(engineers::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| duplicate_or_other(err, RegistryEntity::Engineer, row.id))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, engineer: &Engineer) -> RegistryRepositoryResult<()> {
        let row = engineer_to_row(engineer);
        self.run_blocking(move |connection| {
            let affected = diesel::update(engineers::table.filter(engineers::id.eq(row.id)))
                .set(&row)
                .execute(connection)?;
            ensure_found(affected, RegistryEntity::Engineer, row.id)
        })
        .await
    }

    async fn find_by_id(&self, id: EngineerId) -> RegistryRepositoryResult<Option<Engineer>> {
        self.run_blocking(move |connection| {
            let row = engineers::table
                .filter(engineers::id.eq(id.into_inner()))
                .select(EngineerRow::as_select())
                .first::<EngineerRow>(connection)
                .optional()?;
            Ok(row.map(row_to_engineer))
        })
        .await
    }

    async fn list(&self) -> RegistryRepositoryResult<Vec<Engineer>> {
        self.run_blocking(move |connection| {
            let rows = engineers::table
                .order(engineers::identification.asc())
                .select(EngineerRow::as_select())
                .load::<EngineerRow>(connection)?;
            Ok(rows.into_iter().map(row_to_engineer).collect())
        })
        .await
    }

    async fn delete(&self, id: EngineerId) -> RegistryRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected =
                diesel::delete(engineers::table.filter(engineers::id.eq(id.into_inner())))
                    .execute(connection)?;
            ensure_found(affected, RegistryEntity::Engineer, id.into_inner())
        })
        .await
    }
}

#[async_trait]
impl StationRepository for PostgresRegistryRepository {
    async fn store(&self, station: &Station) -> RegistryRepositoryResult<()> {
        let row = station_to_row(station)?;
        let project_rows = station_project_rows(station);
        let client_rows = station_client_rows(station);
        self.run_blocking(move |connection| {
            connection.transaction(|transaction| {
                diesel::insert_into(stations::table)
                    .values(&row)
                    .execute(transaction)
                    .map_err(|err| duplicate_or_other(err, RegistryEntity::Station, row.id))?;
                diesel::insert_into(station_projects::table)
                    .values(&project_rows)
                    .execute(transaction)?;
                diesel::insert_into(station_clients::table)
                    .values(&client_rows)
                    .execute(transaction)?;
                Ok(())
            })
        })
        .await
    }

    async fn update(&self, station: &Station) -> RegistryRepositoryResult<()> {
        let row = station_to_row(station)?;
        let project_rows = station_project_rows(station);
        let client_rows = station_client_rows(station);
        self.run_blocking(move |connection| {
            connection.transaction(|transaction| {
                let affected = diesel::update(stations::table.filter(stations::id.eq(row.id)))
                    .set(&row)
                    .execute(transaction)?;
                ensure_found(affected, RegistryEntity::Station, row.id)?;
                diesel::delete(
                    station_projects::table.filter(station_projects::station_id.eq(row.id)),
                )
                .execute(transaction)?;
                diesel::delete(
                    station_clients::table.filter(station_clients::station_id.eq(row.id)),
                )
                .execute(transaction)?;
                diesel::insert_into(station_projects::table)
                    .values(&project_rows)
                    .execute(transaction)?;
                diesel::insert_into(station_clients::table)
                    .values(&client_rows)
                    .execute(transaction)?;
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: StationId) -> RegistryRepositoryResult<Option<Station>> {
        self.run_blocking(move |connection| {
            let row = stations::table
                .filter(stations::id.eq(id.into_inner()))
                .select(StationRow::as_select())
                .first::<StationRow>(connection)
                .optional()?;
            let Some(station_row) = row else {
                return Ok(None);
            };
            let station = load_station(connection, station_row)?;
            Ok(Some(station))
        })
        .await
    }

    async fn list(&self) -> RegistryRepositoryResult<Vec<Station>> {
        self.run_blocking(move |connection| {
            let rows = stations::table
                .order(stations::name.asc())
                .select(StationRow::as_select())
                .load::<StationRow>(connection)?;
            rows.into_iter()
                .map(|row| load_station(connection, row))
                .collect()
        })
        .await
    }

    async fn delete(&self, id: StationId) -> RegistryRepositoryResult<()> {
        self.run_blocking(move |connection| {
            // Association rows are dropped by the database via ON DELETE
            // CASCADE on the join-table foreign keys.
            let affected = diesel::delete(stations::table.filter(stations::id.eq(id.into_inner())))
                .execute(connection)?;
            ensure_found(affected, RegistryEntity::Station, id.into_inner())
        })
        .await
    }
}

fn duplicate_or_other(
    err: DieselError,
    entity: RegistryEntity,
    id: uuid::Uuid,
) -> RegistryRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            RegistryRepositoryError::Duplicate(entity, id)
        }
        other => other.into(),
    }
}

fn ensure_found(
    affected: usize,
    entity: RegistryEntity,
    id: uuid::Uuid,
) -> RegistryRepositoryResult<()> {
    if affected == 0 {
        return Err(RegistryRepositoryError::NotFound(entity, id));
    }
    Ok(())
}

fn project_to_row(project: &Project) -> ProjectRow {
    ProjectRow {
        id: project.id().into_inner(),
        name: project.name().to_owned(),
        description: project.description().to_owned(),
        modifier_user: project.modifier_user().into_inner(),
        active: project.state().is_active(),
        created_at: project.created_at(),
        update_at: project.update_at(),
    }
}

fn row_to_project(row: ProjectRow) -> Project {
    Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        name: row.name,
        description: row.description,
        modifier_user: IdentityRef::from_uuid(row.modifier_user),
        state: RecordState::from_bool(row.active),
        stamps: Timestamps::from_persisted(row.created_at, row.update_at),
    })
}

fn client_to_row(client: &Client) -> ClientRow {
    ClientRow {
        id: client.id().into_inner(),
        name: client.name().to_owned(),
        phone: client.phone().map(str::to_owned),
        cell_phone: client.cell_phone().map(str::to_owned),
        email: client.email().to_owned(),
        active: client.state().is_active(),
        created_at: client.created_at(),
        update_at: client.update_at(),
    }
}

fn row_to_client(row: ClientRow) -> Client {
    Client::from_persisted(PersistedClientData {
        id: ClientId::from_uuid(row.id),
        name: row.name,
        phone: row.phone,
        cell_phone: row.cell_phone,
        email: row.email,
        state: RecordState::from_bool(row.active),
        stamps: Timestamps::from_persisted(row.created_at, row.update_at),
    })
}

fn engineer_to_row(engineer: &Engineer) -> EngineerRow {
    EngineerRow {
        id: engineer.id().into_inner(),
        identity: engineer.identity().into_inner(),
        identification: engineer.identification().map(str::to_owned),
        phone: engineer.phone().to_owned(),
        active: engineer.state().is_active(),
        created_at: engineer.created_at(),
        update_at: engineer.update_at(),
    }
}

fn row_to_engineer(row: EngineerRow) -> Engineer {
    Engineer::from_persisted(PersistedEngineerData {
        id: EngineerId::from_uuid(row.id),
        identity: IdentityRef::from_uuid(row.identity),
        identification: row.identification,
        phone: row.phone,
        state: RecordState::from_bool(row.active),
        stamps: Timestamps::from_persisted(row.created_at, row.update_at),
    })
}

fn station_to_row(station: &Station) -> RegistryRepositoryResult<StationRow> {
    let months = i32::try_from(station.maintenance_frequency().months())
        .map_err(RegistryRepositoryError::persistence)?;
    Ok(StationRow {
        id: station.id().into_inner(),
        id_intern: station.id_intern().to_owned(),
        name: station.name().to_owned(),
        maintenance_frequency_months: months,
        latitude: station.coordinates().latitude,
        longitude: station.coordinates().longitude,
        system: station.system().code().to_owned(),
        owner_phone: station.owner_phone().map(str::to_owned),
        modifier_user: station.modifier_user().into_inner(),
        active: station.state().is_active(),
        created_at: station.created_at(),
        update_at: station.update_at(),
    })
}

fn station_project_rows(station: &Station) -> Vec<StationProjectRow> {
    station
        .projects()
        .iter()
        .map(|project| StationProjectRow {
            station_id: station.id().into_inner(),
            project_id: project.into_inner(),
        })
        .collect()
}

fn station_client_rows(station: &Station) -> Vec<StationClientRow> {
    station
        .clients()
        .iter()
        .map(|client| StationClientRow {
            station_id: station.id().into_inner(),
            client_id: client.into_inner(),
        })
        .collect()
}

fn load_station(
    connection: &mut PgConnection,
    row: StationRow,
) -> RegistryRepositoryResult<Station> {
    let project_ids = station_projects::table
        .filter(station_projects::station_id.eq(row.id))
        .select(station_projects::project_id)
        .load::<uuid::Uuid>(connection)?;
    let client_ids = station_clients::table
        .filter(station_clients::station_id.eq(row.id))
        .select(station_clients::client_id)
        .load::<uuid::Uuid>(connection)?;

    let months =
        u32::try_from(row.maintenance_frequency_months).map_err(RegistryRepositoryError::persistence)?;
    let frequency =
        MaintenanceFrequency::new(months).map_err(RegistryRepositoryError::persistence)?;
    let system =
        PipelineSystem::try_from(row.system.as_str()).map_err(RegistryRepositoryError::persistence)?;

    Ok(Station::from_persisted(PersistedStationData {
        id: StationId::from_uuid(row.id),
        id_intern: row.id_intern,
        name: row.name,
        maintenance_frequency: frequency,
        coordinates: Coordinates {
            latitude: row.latitude,
            longitude: row.longitude,
        },
        system,
        owner_phone: row.owner_phone,
        modifier_user: IdentityRef::from_uuid(row.modifier_user),
        projects: project_ids.into_iter().map(ProjectId::from_uuid).collect(),
        clients: client_ids.into_iter().map(ClientId::from_uuid).collect(),
        state: RecordState::from_bool(row.active),
        stamps: Timestamps::from_persisted(row.created_at, row.update_at),
    }))
}
