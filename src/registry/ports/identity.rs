//! Port for the external identity/authentication provider.

use crate::registry::domain::IdentityRef;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity provider operations.
pub type IdentityProviderResult<T> = Result<T, IdentityProviderError>;

/// Errors returned by identity provider implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityProviderError {
    /// The provider could not be reached or rejected the lookup.
    #[error("identity lookup failed: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityProviderError {
    /// Wraps a lookup failure.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}

/// Lookup contract against the external identity provider.
///
/// The provider owns user records; this crate only resolves display names
/// for the references it stores.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves the display name for a user reference.
    ///
    /// Returns `None` when the provider does not know the reference.
    async fn display_name(&self, user: IdentityRef) -> IdentityProviderResult<Option<String>>;
}
