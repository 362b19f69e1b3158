//! Application services for the telemetry context.

mod plans;

pub use plans::{
    DataPlanService, DavisLinkService, LinkDeviceRequest, TelemetryServiceError,
    TelemetryServiceResult,
};
