//! Identifier types for the work-order domain.

use crate::record::ids::entity_id;

entity_id! {
    /// Unique identifier for a service-order record.
    ServiceOrderId
}

entity_id! {
    /// Unique identifier for a maintenance record.
    MaintenanceId
}
