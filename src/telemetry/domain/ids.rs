//! Identifier types for the telemetry domain.

use crate::record::ids::entity_id;

entity_id! {
    /// Unique identifier for a data-plan record.
    DataPlanId
}

entity_id! {
    /// Unique identifier for a Davis station-device link.
    DavisStationId
}
