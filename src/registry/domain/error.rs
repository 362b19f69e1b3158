//! Error types for registry domain validation and parsing.

use crate::record::fields::FieldError;
use thiserror::Error;

/// Errors returned while constructing registry domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryDomainError {
    /// A scalar field failed validation.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// The pipeline system code is not in the fixed set.
    #[error(transparent)]
    UnknownPipelineSystem(#[from] ParsePipelineSystemError),

    /// The maintenance frequency is not a positive number of months.
    #[error("maintenance frequency must be a positive number of months")]
    InvalidMaintenanceFrequency,
}

/// Error returned while parsing pipeline system codes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown pipeline system code: {0}")]
pub struct ParsePipelineSystemError(pub String);
