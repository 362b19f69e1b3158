//! Port contracts for the registry context.

mod identity;
mod repository;

pub use identity::{IdentityProvider, IdentityProviderError, IdentityProviderResult};
pub use repository::{
    ClientRepository, EngineerRepository, ProjectRepository, RegistryEntity,
    RegistryRepositoryError, RegistryRepositoryResult, StationRepository,
};
