//! Error types for the telemetry domain.

use crate::record::fields::FieldError;
use thiserror::Error;

/// Errors raised while validating telemetry domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TelemetryDomainError {
    /// A scalar field failed validation.
    #[error(transparent)]
    Field(#[from] FieldError),
}
