//! Domain model for telemetry data plans and station-device links.

mod data_plan;
mod davis_station;
mod error;
mod ids;

pub use data_plan::{
    DataPlanDavis, PLAN_VALIDITY_DAYS, PersistedDataPlanData, expiry_date,
};
pub use davis_station::{DavisStation, NewDavisStation, PersistedDavisStationData};
pub use error::TelemetryDomainError;
pub use ids::{DataPlanId, DavisStationId};
