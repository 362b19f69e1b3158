//! Identifier types for the registry domain.

use crate::record::ids::entity_id;

entity_id! {
    /// Reference to a user held by the external identity provider.
    ///
    /// The provider owns the user record; this crate stores only the
    /// reference and resolves display names through the identity port.
    IdentityRef
}

entity_id! {
    /// Unique identifier for a project record.
    ProjectId
}

entity_id! {
    /// Unique identifier for a client record.
    ClientId
}

entity_id! {
    /// Unique identifier for an engineer record.
    EngineerId
}

entity_id! {
    /// Unique identifier for a station record.
    StationId
}
