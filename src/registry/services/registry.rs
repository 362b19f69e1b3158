//! Service layer for the project, client, engineer, and station registries.
//!
//! Services validate caller input, resolve references, stamp writes through
//! the injected clock, and delegate persistence to the repository ports.

use crate::registry::{
    domain::{
        Client, ClientId, Coordinates, Engineer, EngineerId, IdentityRef, MaintenanceFrequency,
        NewStation, PipelineSystem, Project, ProjectId, RegistryDomainError, Station, StationId,
    },
    ports::{
        ClientRepository, EngineerRepository, IdentityProvider, IdentityProviderError,
        ProjectRepository, RegistryEntity, RegistryRepositoryError, StationRepository,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Service-level errors for registry operations.
#[derive(Debug, Error)]
pub enum RegistryServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] RegistryDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RegistryRepositoryError),
    /// Identity provider lookup failed.
    #[error(transparent)]
    Identity(#[from] IdentityProviderError),
    /// A referenced record does not exist.
    #[error("referenced {0} does not exist: {1}")]
    MissingReference(RegistryEntity, Uuid),
    /// The identity provider does not know the referenced user.
    #[error("identity cannot be resolved: {0}")]
    MissingIdentity(IdentityRef),
}

/// Result type for registry service operations.
pub type RegistryServiceResult<T> = Result<T, RegistryServiceError>;

/// Project registry orchestration service.
#[derive(Clone)]
pub struct ProjectRegistryService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ProjectRegistryService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project registry service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new project.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError`] when validation fails or the
    /// repository rejects persistence.
    pub async fn register(
        &self,
        name: impl Into<String> + Send,
        description: impl Into<String> + Send,
        modifier_user: IdentityRef,
    ) -> RegistryServiceResult<Project> {
        let project = Project::new(name, description, modifier_user, &*self.clock)?;
        self.repository.store(&project).await?;
        Ok(project)
    }

    /// Finds a project by identifier. Returns `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: ProjectId) -> RegistryServiceResult<Option<Project>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns all projects ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self) -> RegistryServiceResult<Vec<Project>> {
        Ok(self.repository.list().await?)
    }

    /// Renames a project.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError`] when the project is missing or the
    /// new name fails validation.
    pub async fn rename(
        &self,
        id: ProjectId,
        name: impl Into<String> + Send,
        modifier_user: IdentityRef,
    ) -> RegistryServiceResult<Project> {
        let mut project = self.require(id).await?;
        project.rename(name, modifier_user, &*self.clock)?;
        self.repository.update(&project).await?;
        Ok(project)
    }

    /// Replaces a project description.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError`] when the project is missing or the
    /// new description fails validation.
    pub async fn update_description(
        &self,
        id: ProjectId,
        description: impl Into<String> + Send,
        modifier_user: IdentityRef,
    ) -> RegistryServiceResult<Project> {
        let mut project = self.require(id).await?;
        project.update_description(description, modifier_user, &*self.clock)?;
        self.repository.update(&project).await?;
        Ok(project)
    }

    /// Soft deletes a project.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError`] when the project is missing or
    /// persistence fails.
    pub async fn deactivate(&self, id: ProjectId) -> RegistryServiceResult<Project> {
        let mut project = self.require(id).await?;
        project.deactivate(&*self.clock);
        self.repository.update(&project).await?;
        Ok(project)
    }

    /// Restores a soft-deleted project.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError`] when the project is missing or
    /// persistence fails.
    pub async fn activate(&self, id: ProjectId) -> RegistryServiceResult<Project> {
        let mut project = self.require(id).await?;
        project.activate(&*self.clock);
        self.repository.update(&project).await?;
        Ok(project)
    }

    async fn require(&self, id: ProjectId) -> RegistryServiceResult<Project> {
        self.repository.find_by_id(id).await?.ok_or_else(|| {
            RegistryRepositoryError::NotFound(RegistryEntity::Project, id.into_inner()).into()
        })
    }
}

/// Request payload for registering a new client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterClientRequest {
    name: String,
    phone: Option<String>,
    cell_phone: Option<String>,
    email: String,
}

impl RegisterClientRequest {
    /// Creates a request with required client fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: None,
            cell_phone: None,
            email: email.into(),
        }
    }

    /// Sets the landline number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the mobile number.
    #[must_use]
    pub fn with_cell_phone(mut self, cell_phone: impl Into<String>) -> Self {
        self.cell_phone = Some(cell_phone.into());
        self
    }
}

/// Client registry orchestration service.
#[derive(Clone)]
pub struct ClientRegistryService<R, C>
where
    R: ClientRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ClientRegistryService<R, C>
where
    R: ClientRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new client registry service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new client.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError`] when validation fails or the
    /// repository rejects persistence.
    pub async fn register(&self, request: RegisterClientRequest) -> RegistryServiceResult<Client> {
        let client = Client::new(
            request.name,
            request.phone,
            request.cell_phone,
            request.email,
            &*self.clock,
        )?;
        self.repository.store(&client).await?;
        Ok(client)
    }

    /// Finds a client by identifier. Returns `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: ClientId) -> RegistryServiceResult<Option<Client>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns all clients ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self) -> RegistryServiceResult<Vec<Client>> {
        Ok(self.repository.list().await?)
    }

    /// Replaces a client's contact details.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError`] when the client is missing or the
    /// new details fail validation.
    pub async fn update_contact(
        &self,
        id: ClientId,
        phone: Option<String>,
        cell_phone: Option<String>,
        email: impl Into<String> + Send,
    ) -> RegistryServiceResult<Client> {
        let mut client = self.require(id).await?;
        client.update_contact(phone, cell_phone, email, &*self.clock)?;
        self.repository.update(&client).await?;
        Ok(client)
    }

    /// Soft deletes a client. No referencing record is affected.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError`] when the client is missing or
    /// persistence fails.
    pub async fn deactivate(&self, id: ClientId) -> RegistryServiceResult<Client> {
        let mut client = self.require(id).await?;
        client.deactivate(&*self.clock);
        self.repository.update(&client).await?;
        Ok(client)
    }

    /// Restores a soft-deleted client.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError`] when the client is missing or
    /// persistence fails.
    pub async fn activate(&self, id: ClientId) -> RegistryServiceResult<Client> {
        let mut client = self.require(id).await?;
        client.activate(&*self.clock);
        self.repository.update(&client).await?;
        Ok(client)
    }

    async fn require(&self, id: ClientId) -> RegistryServiceResult<Client> {
        self.repository.find_by_id(id).await?.ok_or_else(|| {
            RegistryRepositoryError::NotFound(RegistryEntity::Client, id.into_inner()).into()
        })
    }
}

/// Engineer registry orchestration service.
#[derive(Clone)]
pub struct EngineerRegistryService<R, I, C>
where
    R: EngineerRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    identities: Arc<I>,
    clock: Arc<C>,
}

impl<R, I, C> EngineerRegistryService<R, I, C>
where
    R: EngineerRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    /// Creates a new engineer registry service.
    #[must_use]
    pub const fn new(repository: Arc<R>, identities: Arc<I>, clock: Arc<C>) -> Self {
        Self {
            repository,
            identities,
            clock,
        }
    }

    /// Registers a new engineer bound to an identity reference.
    ///
    /// The identity must be known to the provider at registration time.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::MissingIdentity`] when the provider
    /// does not know the reference, or other [`RegistryServiceError`]
    /// variants when validation or persistence fails.
    pub async fn register(
        &self,
        identity: IdentityRef,
        identification: Option<String>,
        phone: impl Into<String> + Send,
    ) -> RegistryServiceResult<Engineer> {
        if self.identities.display_name(identity).await?.is_none() {
            return Err(RegistryServiceError::MissingIdentity(identity));
        }
        let engineer = Engineer::new(identity, identification, phone, &*self.clock)?;
        self.repository.store(&engineer).await?;
        Ok(engineer)
    }

    /// Finds an engineer by identifier. Returns `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: EngineerId) -> RegistryServiceResult<Option<Engineer>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns all engineers ordered by identification number.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self) -> RegistryServiceResult<Vec<Engineer>> {
        Ok(self.repository.list().await?)
    }

    /// Replaces an engineer's phone number.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError`] when the engineer is missing or the
    /// new value fails validation.
    pub async fn update_phone(
        &self,
        id: EngineerId,
        phone: impl Into<String> + Send,
    ) -> RegistryServiceResult<Engineer> {
        let mut engineer = self.require(id).await?;
        engineer.update_phone(phone, &*self.clock)?;
        self.repository.update(&engineer).await?;
        Ok(engineer)
    }

    /// Replaces an engineer's identification number. Blank input clears it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError`] when the engineer is missing or the
    /// new value fails validation.
    pub async fn update_identification(
        &self,
        id: EngineerId,
        identification: Option<String>,
    ) -> RegistryServiceResult<Engineer> {
        let mut engineer = self.require(id).await?;
        engineer.update_identification(identification, &*self.clock)?;
        self.repository.update(&engineer).await?;
        Ok(engineer)
    }

    /// Resolves the display label for an engineer (the identity's display
    /// name).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::MissingIdentity`] when the provider
    /// no longer knows the identity reference.
    pub async fn label(&self, id: EngineerId) -> RegistryServiceResult<String> {
        let engineer = self.require(id).await?;
        self.identities
            .display_name(engineer.identity())
            .await?
            .ok_or(RegistryServiceError::MissingIdentity(engineer.identity()))
    }

    /// Soft deletes an engineer.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError`] when the engineer is missing or
    /// persistence fails.
    pub async fn deactivate(&self, id: EngineerId) -> RegistryServiceResult<Engineer> {
        let mut engineer = self.require(id).await?;
        engineer.deactivate(&*self.clock);
        self.repository.update(&engineer).await?;
        Ok(engineer)
    }

    /// Restores a soft-deleted engineer.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError`] when the engineer is missing or
    /// persistence fails.
    pub async fn activate(&self, id: EngineerId) -> RegistryServiceResult<Engineer> {
        let mut engineer = self.require(id).await?;
        engineer.activate(&*self.clock);
        self.repository.update(&engineer).await?;
        Ok(engineer)
    }

    async fn require(&self, id: EngineerId) -> RegistryServiceResult<Engineer> {
        self.repository.find_by_id(id).await?.ok_or_else(|| {
            RegistryRepositoryError::NotFound(RegistryEntity::Engineer, id.into_inner()).into()
        })
    }
}

/// Request payload for registering a new station.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterStationRequest {
    id_intern: String,
    name: String,
    frequency_months: u32,
    coordinates: Coordinates,
    system_code: String,
    owner_phone: Option<String>,
    modifier_user: IdentityRef,
    projects: Vec<ProjectId>,
    clients: Vec<ClientId>,
}

impl RegisterStationRequest {
    /// Creates a request with required station fields.
    #[must_use]
    pub fn new(
        id_intern: impl Into<String>,
        name: impl Into<String>,
        frequency_months: u32,
        system_code: impl Into<String>,
        modifier_user: IdentityRef,
    ) -> Self {
        Self {
            id_intern: id_intern.into(),
            name: name.into(),
            frequency_months,
            coordinates: Coordinates::default(),
            system_code: system_code.into(),
            owner_phone: None,
            modifier_user,
            projects: Vec::new(),
            clients: Vec::new(),
        }
    }

    /// Sets the surveyed position.
    #[must_use]
    pub const fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Coordinates {
            latitude: Some(latitude),
            longitude: Some(longitude),
        };
        self
    }

    /// Sets the site owner's phone number.
    #[must_use]
    pub fn with_owner_phone(mut self, owner_phone: impl Into<String>) -> Self {
        self.owner_phone = Some(owner_phone.into());
        self
    }

    /// Sets the initial project associations.
    #[must_use]
    pub fn with_projects(mut self, projects: impl IntoIterator<Item = ProjectId>) -> Self {
        self.projects = projects.into_iter().collect();
        self
    }

    /// Sets the initial client associations.
    #[must_use]
    pub fn with_clients(mut self, clients: impl IntoIterator<Item = ClientId>) -> Self {
        self.clients = clients.into_iter().collect();
        self
    }
}

/// Station registry orchestration service.
#[derive(Clone)]
pub struct StationRegistryService<SR, PR, CR, C>
where
    SR: StationRepository,
    PR: ProjectRepository,
    CR: ClientRepository,
    C: Clock + Send + Sync,
{
    stations: Arc<SR>,
    projects: Arc<PR>,
    clients: Arc<CR>,
    clock: Arc<C>,
}

impl<SR, PR, CR, C> StationRegistryService<SR, PR, CR, C>
where
    SR: StationRepository,
    PR: ProjectRepository,
    CR: ClientRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new station registry service.
    #[must_use]
    pub const fn new(
        stations: Arc<SR>,
        projects: Arc<PR>,
        clients: Arc<CR>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            stations,
            projects,
            clients,
            clock,
        }
    }

    /// Registers a new station with its initial associations.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Domain`] when a field, the pipeline
    /// system code, or the frequency fails validation, and
    /// [`RegistryServiceError::MissingReference`] when an associated project
    /// or client does not exist.
    pub async fn register(
        &self,
        request: RegisterStationRequest,
    ) -> RegistryServiceResult<Station> {
        let system = PipelineSystem::try_from(request.system_code.as_str())
            .map_err(RegistryDomainError::from)?;
        let frequency = MaintenanceFrequency::new(request.frequency_months)?;
        self.resolve_projects(&request.projects).await?;
        self.resolve_clients(&request.clients).await?;

        let mut station = Station::new(
            NewStation {
                id_intern: request.id_intern,
                name: request.name,
                maintenance_frequency: frequency,
                coordinates: request.coordinates,
                system,
                owner_phone: request.owner_phone,
                modifier_user: request.modifier_user,
            },
            &*self.clock,
        )?;
        station.set_projects(request.projects, request.modifier_user, &*self.clock);
        station.set_clients(request.clients, request.modifier_user, &*self.clock);
        self.stations.store(&station).await?;
        Ok(station)
    }

    /// Finds a station by identifier. Returns `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: StationId) -> RegistryServiceResult<Option<Station>> {
        Ok(self.stations.find_by_id(id).await?)
    }

    /// Returns all stations ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self) -> RegistryServiceResult<Vec<Station>> {
        Ok(self.stations.list().await?)
    }

    /// Replaces the full set of project associations atomically with the
    /// owning station write.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::MissingReference`] when a project
    /// does not exist.
    pub async fn set_projects(
        &self,
        id: StationId,
        projects: Vec<ProjectId>,
        modifier_user: IdentityRef,
    ) -> RegistryServiceResult<Station> {
        self.resolve_projects(&projects).await?;
        let mut station = self.require(id).await?;
        station.set_projects(projects, modifier_user, &*self.clock);
        self.stations.update(&station).await?;
        Ok(station)
    }

    /// Replaces the full set of client associations atomically with the
    /// owning station write.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::MissingReference`] when a client
    /// does not exist.
    pub async fn set_clients(
        &self,
        id: StationId,
        clients: Vec<ClientId>,
        modifier_user: IdentityRef,
    ) -> RegistryServiceResult<Station> {
        self.resolve_clients(&clients).await?;
        let mut station = self.require(id).await?;
        station.set_clients(clients, modifier_user, &*self.clock);
        self.stations.update(&station).await?;
        Ok(station)
    }

    /// Reassigns the station to another pipeline system.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Domain`] when the code is not in the
    /// fixed set.
    pub async fn reassign_system(
        &self,
        id: StationId,
        system_code: &str,
        modifier_user: IdentityRef,
    ) -> RegistryServiceResult<Station> {
        let system = PipelineSystem::try_from(system_code).map_err(RegistryDomainError::from)?;
        let mut station = self.require(id).await?;
        station.reassign_system(system, modifier_user, &*self.clock);
        self.stations.update(&station).await?;
        Ok(station)
    }

    /// Replaces the maintenance frequency.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::Domain`] when the frequency is zero.
    pub async fn set_maintenance_frequency(
        &self,
        id: StationId,
        frequency_months: u32,
        modifier_user: IdentityRef,
    ) -> RegistryServiceResult<Station> {
        let frequency = MaintenanceFrequency::new(frequency_months)?;
        let mut station = self.require(id).await?;
        station.set_maintenance_frequency(frequency, modifier_user, &*self.clock);
        self.stations.update(&station).await?;
        Ok(station)
    }

    /// Resolves the display label for a station: its name joined with the
    /// names of its associated projects.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError::MissingReference`] when an
    /// associated project row has gone missing.
    pub async fn label(&self, id: StationId) -> RegistryServiceResult<String> {
        let station = self.require(id).await?;
        let projects = self.resolve_projects(station.projects()).await?;
        Ok(super::labels::station_label(&station, &projects))
    }

    /// Soft deletes a station. No referencing record is affected.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError`] when the station is missing or
    /// persistence fails.
    pub async fn deactivate(&self, id: StationId) -> RegistryServiceResult<Station> {
        let mut station = self.require(id).await?;
        station.deactivate(&*self.clock);
        self.stations.update(&station).await?;
        Ok(station)
    }

    /// Restores a soft-deleted station.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryServiceError`] when the station is missing or
    /// persistence fails.
    pub async fn activate(&self, id: StationId) -> RegistryServiceResult<Station> {
        let mut station = self.require(id).await?;
        station.activate(&*self.clock);
        self.stations.update(&station).await?;
        Ok(station)
    }

    async fn require(&self, id: StationId) -> RegistryServiceResult<Station> {
        self.stations.find_by_id(id).await?.ok_or_else(|| {
            RegistryRepositoryError::NotFound(RegistryEntity::Station, id.into_inner()).into()
        })
    }

    async fn resolve_projects(
        &self,
        ids: &[ProjectId],
    ) -> RegistryServiceResult<Vec<Project>> {
        let mut projects = Vec::with_capacity(ids.len());
        for id in ids {
            let project = self.projects.find_by_id(*id).await?.ok_or(
                RegistryServiceError::MissingReference(RegistryEntity::Project, id.into_inner()),
            )?;
            projects.push(project);
        }
        Ok(projects)
    }

    async fn resolve_clients(&self, ids: &[ClientId]) -> RegistryServiceResult<Vec<Client>> {
        let mut clients = Vec::with_capacity(ids.len());
        for id in ids {
            let client = self.clients.find_by_id(*id).await?.ok_or(
                RegistryServiceError::MissingReference(RegistryEntity::Client, id.into_inner()),
            )?;
            clients.push(client);
        }
        Ok(clients)
    }
}
