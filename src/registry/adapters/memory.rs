//! Thread-safe in-memory adapters for the registry ports.
//!
//! Primary test double for the registry context; behavior matches the
//! `PostgreSQL` adapters including ordering and duplicate detection.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::registry::{
    domain::{Client, ClientId, Engineer, EngineerId, IdentityRef, Project, ProjectId, Station, StationId},
    ports::{
        ClientRepository, EngineerRepository, IdentityProvider, IdentityProviderResult,
        ProjectRepository, RegistryEntity, RegistryRepositoryError, RegistryRepositoryResult,
        StationRepository,
    },
};

fn lock_poisoned<T>(err: std::sync::PoisonError<T>) -> RegistryRepositoryError {
    RegistryRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    rows: Arc<RwLock<HashMap<ProjectId, Project>>>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> RegistryRepositoryResult<()> {
        let mut rows = self.rows.write().map_err(lock_poisoned)?;
        if rows.contains_key(&project.id()) {
            return Err(RegistryRepositoryError::Duplicate(
                RegistryEntity::Project,
                project.id().into_inner(),
            ));
        }
        rows.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> RegistryRepositoryResult<()> {
        let mut rows = self.rows.write().map_err(lock_poisoned)?;
        if !rows.contains_key(&project.id()) {
            return Err(RegistryRepositoryError::NotFound(
                RegistryEntity::Project,
                project.id().into_inner(),
            ));
        }
        rows.insert(project.id(), project.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> RegistryRepositoryResult<Option<Project>> {
        let rows = self.rows.read().map_err(lock_poisoned)?;
        Ok(rows.get(&id).cloned())
    }

    async fn list(&self) -> RegistryRepositoryResult<Vec<Project>> {
        let rows = self.rows.read().map_err(lock_poisoned)?;
        let mut projects: Vec<Project> = rows.values().cloned().collect();
        projects.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(projects)
    }
}

/// Thread-safe in-memory client repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClientRepository {
    rows: Arc<RwLock<HashMap<ClientId, Client>>>,
}

impl InMemoryClientRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn store(&self, client: &Client) -> RegistryRepositoryResult<()> {
        let mut rows = self.rows.write().map_err(lock_poisoned)?;
        if rows.contains_key(&client.id()) {
            return Err(RegistryRepositoryError::Duplicate(
                RegistryEntity::Client,
                client.id().into_inner(),
            ));
        }
        rows.insert(client.id(), client.clone());
        Ok(())
    }

    async fn update(&self, client: &Client) -> RegistryRepositoryResult<()> {
        let mut rows = self.rows.write().map_err(lock_poisoned)?;
        if !rows.contains_key(&client.id()) {
            return Err(RegistryRepositoryError::NotFound(
                RegistryEntity::Client,
                client.id().into_inner(),
            ));
        }
        rows.insert(client.id(), client.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ClientId) -> RegistryRepositoryResult<Option<Client>> {
        let rows = self.rows.read().map_err(lock_poisoned)?;
        Ok(rows.get(&id).cloned())
    }

    async fn list(&self) -> RegistryRepositoryResult<Vec<Client>> {
        let rows = self.rows.read().map_err(lock_poisoned)?;
        let mut clients: Vec<Client> = rows.values().cloned().collect();
        clients.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(clients)
    }
}

/// Thread-safe in-memory engineer repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEngineerRepository {
    rows: Arc<RwLock<HashMap<EngineerId, Engineer>>>,
}

impl InMemoryEngineerRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EngineerRepository for InMemoryEngineerRepository {
    async fn store(&self, engineer: &Engineer) -> RegistryRepositoryResult<()> {
        let mut rows = self.rows.write().map_err(lock_poisoned)?;
        if rows.contains_key(&engineer.id()) {
            return Err(RegistryRepositoryError::Duplicate(
                RegistryEntity::Engineer,
                engineer.id().into_inner(),
            ));
        }
        rows.insert(engineer.id(), engineer.clone());
        Ok(())
    }

    async fn update(&self, engineer: &Engineer) -> RegistryRepositoryResult<()> {
        let mut rows = self.rows.write().map_err(lock_poisoned)?;
        if !rows.contains_key(&engineer.id()) {
            return Err(RegistryRepositoryError::NotFound(
                RegistryEntity::Engineer,
                engineer.id().into_inner(),
            ));
        }
        rows.insert(engineer.id(), engineer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: EngineerId) -> RegistryRepositoryResult<Option<Engineer>> {
        let rows = self.rows.read().map_err(lock_poisoned)?;
        Ok(rows.get(&id).cloned())
    }

    async fn list(&self) -> RegistryRepositoryResult<Vec<Engineer>> {
        let rows = self.rows.read().map_err(lock_poisoned)?;
        let mut engineers: Vec<Engineer> = rows.values().cloned().collect();
        engineers.sort_by(|a, b| {
            // Records without an identification number sort last.
            match (a.identification(), b.identification()) {
                (Some(left), Some(right)) => left.cmp(right),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });
        Ok(engineers)
    }

    async fn delete(&self, id: EngineerId) -> RegistryRepositoryResult<()> {
        let mut rows = self.rows.write().map_err(lock_poisoned)?;
        if rows.remove(&id).is_none() {
            return Err(RegistryRepositoryError::NotFound(
                RegistryEntity::Engineer,
                id.into_inner(),
            ));
        }
        Ok(())
    }
}

/// Thread-safe in-memory station repository.
///
/// Association rows live inside the station aggregate, so atomic
/// replacement comes for free with the row swap.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStationRepository {
    rows: Arc<RwLock<HashMap<StationId, Station>>>,
}

impl InMemoryStationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StationRepository for InMemoryStationRepository {
    async fn store(&self, station: &Station) -> RegistryRepositoryResult<()> {
        let mut rows = self.rows.write().map_err(lock_poisoned)?;
        if rows.contains_key(&station.id()) {
            return Err(RegistryRepositoryError::Duplicate(
                RegistryEntity::Station,
                station.id().into_inner(),
            ));
        }
        rows.insert(station.id(), station.clone());
        Ok(())
    }

    async fn update(&self, station: &Station) -> RegistryRepositoryResult<()> {
        let mut rows = self.rows.write().map_err(lock_poisoned)?;
        if !rows.contains_key(&station.id()) {
            return Err(RegistryRepositoryError::NotFound(
                RegistryEntity::Station,
                station.id().into_inner(),
            ));
        }
        rows.insert(station.id(), station.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: StationId) -> RegistryRepositoryResult<Option<Station>> {
        let rows = self.rows.read().map_err(lock_poisoned)?;
        Ok(rows.get(&id).cloned())
    }

    async fn list(&self) -> RegistryRepositoryResult<Vec<Station>> {
        let rows = self.rows.read().map_err(lock_poisoned)?;
        let mut stations: Vec<Station> = rows.values().cloned().collect();
        stations.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(stations)
    }

    async fn delete(&self, id: StationId) -> RegistryRepositoryResult<()> {
        let mut rows = self.rows.write().map_err(lock_poisoned)?;
        if rows.remove(&id).is_none() {
            return Err(RegistryRepositoryError::NotFound(
                RegistryEntity::Station,
                id.into_inner(),
            ));
        }
        Ok(())
    }
}

/// In-memory identity provider keyed by identity reference.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityProvider {
    names: Arc<RwLock<HashMap<IdentityRef, String>>>,
}

impl InMemoryIdentityProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a display name for a user reference.
    ///
    /// # Panics
    ///
    /// Panics when the internal lock is poisoned; the provider is a test
    /// double and has no recovery path.
    pub fn insert(&self, user: IdentityRef, display_name: impl Into<String>) {
        match self.names.write() {
            Ok(mut names) => {
                names.insert(user, display_name.into());
            }
            Err(err) => panic!("identity provider lock poisoned: {err}"),
        }
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn display_name(&self, user: IdentityRef) -> IdentityProviderResult<Option<String>> {
        let names = self
            .names
            .read()
            .map_err(|err| {
                crate::registry::ports::IdentityProviderError::lookup(std::io::Error::other(
                    err.to_string(),
                ))
            })?;
        Ok(names.get(&user).cloned())
    }
}
