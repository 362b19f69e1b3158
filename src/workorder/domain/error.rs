//! Error types for the work-order domain.

use crate::record::fields::FieldError;
use thiserror::Error;

/// Errors raised while validating work-order domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkOrderDomainError {
    /// A scalar field failed validation.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// The maintenance type code is not in the fixed set.
    #[error(transparent)]
    UnknownMaintenanceType(#[from] ParseMaintenanceTypeError),
}

/// Raised when a maintenance type code cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown maintenance type code: {0}")]
pub struct ParseMaintenanceTypeError(pub String);
