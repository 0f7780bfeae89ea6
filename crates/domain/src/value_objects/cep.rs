//! Brazilian postal code (CEP) value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A normalized Brazilian postal code: exactly 8 ASCII digits.
///
/// Input may carry separators (`"01310-930"`) or trailing noise; parsing
/// strips every non-digit character and keeps the first 8 digits. Anything
/// that normalizes to fewer than 8 digits is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cep(String);

impl Cep {
    /// Parse and normalize a raw postal code
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCep` if the input holds fewer than
    /// 8 digits after normalization.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).take(8).collect();
        if digits.len() != 8 {
            return Err(DomainError::InvalidCep(raw.to_string()));
        }
        Ok(Self(digits))
    }

    /// The canonical 8-digit form
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Cep {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cep> for String {
    fn from(cep: Cep) -> Self {
        cep.0
    }
}
