//! Shared error type across ovbind crates.

use thiserror::Error;

use crate::handle::{NativeAddr, ObjectKind};

/// Status codes reported by the native layer (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// Unclassified native failure.
    GeneralError,
    /// Entry point not provided by this native layer.
    NotImplemented,
    /// Unknown device, model, or metric.
    NotFound,
    /// Handle refers to an object of a different kind.
    ParameterMismatch,
    /// A native resource limit was hit.
    OutOfBounds,
    /// Handle is not (or no longer) allocated.
    NotAllocated,
    /// Configuration rejected.
    InvalidConfig,
    /// Unsupported configuration version.
    UnsupportedVersion,
    /// Failure outside the native layer (I/O and similar).
    Internal,
}

impl StatusCode {
    /// String representation used in logs and dumps.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::GeneralError => "GENERAL_ERROR",
            StatusCode::NotImplemented => "NOT_IMPLEMENTED",
            StatusCode::NotFound => "NOT_FOUND",
            StatusCode::ParameterMismatch => "PARAMETER_MISMATCH",
            StatusCode::OutOfBounds => "OUT_OF_BOUNDS",
            StatusCode::NotAllocated => "NOT_ALLOCATED",
            StatusCode::InvalidConfig => "INVALID_CONFIG",
            StatusCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            StatusCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, OvError>;

/// Unified error type used by the bindings and the runtime.
#[derive(Debug, Error)]
pub enum OvError {
    #[error("general error: {0}")]
    General(String),
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("handle {addr} is a {found}, expected {expected}")]
    KindMismatch {
        addr: NativeAddr,
        expected: ObjectKind,
        found: ObjectKind,
    },
    #[error("out of bounds: {0}")]
    OutOfBounds(String),
    #[error("handle {0} is not allocated")]
    NotAllocated(NativeAddr),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl OvError {
    /// Map the error to its stable status code.
    pub fn status(&self) -> StatusCode {
        match self {
            OvError::General(_) => StatusCode::GeneralError,
            OvError::NotImplemented(_) => StatusCode::NotImplemented,
            OvError::NotFound(_) => StatusCode::NotFound,
            OvError::KindMismatch { .. } => StatusCode::ParameterMismatch,
            OvError::OutOfBounds(_) => StatusCode::OutOfBounds,
            OvError::NotAllocated(_) => StatusCode::NotAllocated,
            OvError::InvalidConfig(_) => StatusCode::InvalidConfig,
            OvError::UnsupportedVersion => StatusCode::UnsupportedVersion,
            OvError::Internal(_) => StatusCode::Internal,
        }
    }
}
