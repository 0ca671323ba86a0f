//! Store error types and their logging categories.

use std::fmt;

use stafftrack_core::CoreError;

/// Failures surfaced by record store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record under this module/id pair.
    #[error("Record not found: {module}/{id}")]
    NotFound { module: String, id: String },

    /// A create hit an id that is already taken.
    #[error("Record already exists: {module}/{id}")]
    AlreadyExists { module: String, id: String },

    /// The payload failed validation before reaching the backend.
    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },

    /// The backend could not be reached.
    #[error("Store connection failed: {message}")]
    Connection { message: String },

    /// Anything the backend cannot express more precisely.
    #[error("Internal store error: {message}")]
    Internal { message: String },
}

impl StoreError {
    #[must_use]
    pub fn not_found(module: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            module: module.into(),
            id: id.into(),
        }
    }

    #[must_use]
    pub fn already_exists(module: impl Into<String>, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            module: module.into(),
            id: id.into(),
        }
    }

    #[must_use]
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the record was simply missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether a create collided with an existing id.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Buckets the error for log fields and API error bodies.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::AlreadyExists { .. } => ErrorCategory::Conflict,
            Self::InvalidRecord { .. } => ErrorCategory::Validation,
            Self::Connection { .. } => ErrorCategory::Infrastructure,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        StoreError::invalid_record(err.to_string())
    }
}

/// Coarse failure buckets carried into log fields and error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    NotFound,
    Conflict,
    Validation,
    Infrastructure,
    Internal,
}

impl ErrorCategory {
    /// Stable snake_case name, the form clients see.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Validation => "validation",
            Self::Infrastructure => "infrastructure",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
