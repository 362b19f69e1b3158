//! Application services for the registry context.

pub mod labels;
mod registry;

pub use registry::{
    ClientRegistryService, EngineerRegistryService, ProjectRegistryService,
    RegisterClientRequest, RegisterStationRequest, RegistryServiceError, RegistryServiceResult,
    StationRegistryService,
};
