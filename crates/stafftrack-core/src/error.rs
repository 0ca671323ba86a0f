//! Core error types shared across the StaffTrack crates.

use std::fmt;

/// Errors produced by the core layer (module resolution, field schema,
/// record decoding, input normalization).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The given name does not identify any module.
    #[error("Unknown module: {name}")]
    UnknownModule {
        /// The name that failed to resolve.
        name: String,
    },

    /// A submitted field value failed validation or coercion.
    #[error("Invalid field '{field}': {message}")]
    InvalidField {
        /// The field definition name.
        field: String,
        /// Description of what was wrong with the value.
        message: String,
    },

    /// A record could not be decoded into its module's concrete type.
    #[error("Record decode error for {module}: {message}")]
    RecordDecode {
        /// The module whose record failed to decode.
        module: String,
        /// Description of the decode failure.
        message: String,
    },

    /// A serialization or deserialization failure outside record decoding.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Creates a new `UnknownModule` error.
    #[must_use]
    pub fn unknown_module(name: impl Into<String>) -> Self {
        Self::UnknownModule { name: name.into() }
    }

    /// Creates a new `InvalidField` error.
    #[must_use]
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a new `RecordDecode` error.
    #[must_use]
    pub fn record_decode(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RecordDecode {
            module: module.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this error is caused by caller input rather than
    /// an internal failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownModule { .. } | Self::InvalidField { .. }
        )
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownModule { .. } | Self::InvalidField { .. } => ErrorCategory::Validation,
            Self::RecordDecode { .. } | Self::Serialization(_) => ErrorCategory::Serialization,
        }
    }
}

/// Categories of core errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Caller input failed validation.
    Validation,
    /// Data could not be (de)serialized.
    Serialization,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Serialization => write!(f, "serialization"),
        }
    }
}

/// Type alias for results with a [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
