//! Repository ports for registry persistence.

use crate::registry::domain::{
    Client, ClientId, Engineer, EngineerId, Project, ProjectId, Station, StationId,
};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Result type for registry repository operations.
pub type RegistryRepositoryResult<T> = Result<T, RegistryRepositoryError>;

/// Entity kind carried by registry repository errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryEntity {
    /// Project record.
    Project,
    /// Client record.
    Client,
    /// Engineer record.
    Engineer,
    /// Station record.
    Station,
}

impl fmt::Display for RegistryEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Project => "project",
            Self::Client => "client",
            Self::Engineer => "engineer",
            Self::Station => "station",
        };
        f.write_str(label)
    }
}

/// Errors returned by registry repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RegistryRepositoryError {
    /// The record was not found.
    #[error("{0} not found: {1}")]
    NotFound(RegistryEntity, Uuid),

    /// A record with the same identifier already exists.
    #[error("duplicate {0} identifier: {1}")]
    Duplicate(RegistryEntity, Uuid),

    /// Concurrent write conflict surfaced by the storage layer.
    #[error("storage write conflict: {0}")]
    Conflict(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RegistryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryRepositoryError::Duplicate`] when the identifier
    /// already exists.
    async fn store(&self, project: &Project) -> RegistryRepositoryResult<()>;

    /// Persists changes to an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryRepositoryError::NotFound`] when the project does
    /// not exist.
    async fn update(&self, project: &Project) -> RegistryRepositoryResult<()>;

    /// Finds a project by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: ProjectId) -> RegistryRepositoryResult<Option<Project>>;

    /// Returns all projects ordered by name.
    async fn list(&self) -> RegistryRepositoryResult<Vec<Project>>;
}

/// Client persistence contract.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Stores a new client.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryRepositoryError::Duplicate`] when the identifier
    /// already exists.
    async fn store(&self, client: &Client) -> RegistryRepositoryResult<()>;

    /// Persists changes to an existing client.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryRepositoryError::NotFound`] when the client does
    /// not exist.
    async fn update(&self, client: &Client) -> RegistryRepositoryResult<()>;

    /// Finds a client by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: ClientId) -> RegistryRepositoryResult<Option<Client>>;

    /// Returns all clients ordered by name.
    async fn list(&self) -> RegistryRepositoryResult<Vec<Client>>;
}

/// Engineer persistence contract.
#[async_trait]
pub trait EngineerRepository: Send + Sync {
    /// Stores a new engineer.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryRepositoryError::Duplicate`] when the identifier
    /// already exists.
    async fn store(&self, engineer: &Engineer) -> RegistryRepositoryResult<()>;

    /// Persists changes to an existing engineer.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryRepositoryError::NotFound`] when the engineer does
    /// not exist.
    async fn update(&self, engineer: &Engineer) -> RegistryRepositoryResult<()>;

    /// Finds an engineer by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: EngineerId) -> RegistryRepositoryResult<Option<Engineer>>;

    /// Returns all engineers ordered by identification number.
    async fn list(&self) -> RegistryRepositoryResult<Vec<Engineer>>;

    /// Hard deletes an engineer row.
    ///
    /// Only ever invoked as part of a cascade; service orders referencing
    /// the engineer must be removed first.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryRepositoryError::NotFound`] when the engineer does
    /// not exist.
    async fn delete(&self, id: EngineerId) -> RegistryRepositoryResult<()>;
}

/// Station persistence contract.
///
/// Implementations persist the project and client join rows atomically with
/// the owning station write.
#[async_trait]
pub trait StationRepository: Send + Sync {
    /// Stores a new station together with its association rows.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryRepositoryError::Duplicate`] when the identifier
    /// already exists.
    async fn store(&self, station: &Station) -> RegistryRepositoryResult<()>;

    /// Persists changes to an existing station, replacing its association
    /// rows.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryRepositoryError::NotFound`] when the station does
    /// not exist.
    async fn update(&self, station: &Station) -> RegistryRepositoryResult<()>;

    /// Finds a station by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: StationId) -> RegistryRepositoryResult<Option<Station>>;

    /// Returns all stations ordered by name.
    async fn list(&self) -> RegistryRepositoryResult<Vec<Station>>;

    /// Hard deletes a station row and its association rows.
    ///
    /// Only ever invoked as part of a cascade; records referencing the
    /// station must be removed first.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryRepositoryError::NotFound`] when the station does
    /// not exist.
    async fn delete(&self, id: StationId) -> RegistryRepositoryResult<()>;
}
