//! Domain-level errors

use thiserror::Error;

/// Errors raised by domain validation rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Postal code does not normalize to 8 digits
    #[error("Invalid CEP: {0:?} does not contain 8 digits")]
    InvalidCep(String),

    /// Trip name is empty or too long
    #[error("Invalid trip name: {0}")]
    InvalidTripName(String),
}
