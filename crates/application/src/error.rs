//! Application-level errors

use domain::DomainError;
use std::fmt;
use thiserror::Error;

use crate::ports::GeocodeError;

/// Which postal-code field of a trip request failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CepField {
    /// The origin postal code
    Origem,
    /// The destination postal code
    Destino,
}

impl CepField {
    /// Wire name of the field
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Origem => "origem_cep",
            Self::Destino => "destino_cep",
        }
    }
}

impl fmt::Display for CepField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level validation error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A trip postal code was rejected during validation
    #[error("{field} rejected: {source}")]
    CepRejected {
        /// Which field failed
        field: CepField,
        /// The postal code as submitted
        cep: String,
        /// The taxonomy case that caused the rejection
        source: GeocodeError,
    },

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A collaborating service failed
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal error (storage, task join, ...)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Rejection helper keeping field and submitted code together
    #[must_use]
    pub fn cep_rejected(field: CepField, cep: &str, source: GeocodeError) -> Self {
        Self::CepRejected {
            field,
            cep: cep.to_string(),
            source,
        }
    }
}
