//! Trip entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::Cep;

/// Maximum length of a trip name in characters
const MAX_NAME_LEN: usize = 120;

/// A stored trip between two postal codes.
///
/// `distancia_km` is only ever written by an explicit distance computation;
/// editing the postal codes does not touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Store-assigned identifier
    pub id: i64,
    /// Display name (1-120 characters)
    pub nome: String,
    /// Origin postal code
    pub origem_cep: Cep,
    /// Destination postal code
    pub destino_cep: Cep,
    /// Last computed distance in kilometers, if any
    pub distancia_km: Option<f64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp, set on mutation
    pub updated_at: Option<DateTime<Utc>>,
}

/// Validated data for a trip about to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripDraft {
    /// Display name (1-120 characters)
    pub nome: String,
    /// Origin postal code
    pub origem_cep: Cep,
    /// Destination postal code
    pub destino_cep: Cep,
}

impl TripDraft {
    /// Build a draft, validating the name
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTripName` if the name is empty or
    /// longer than 120 characters.
    pub fn new(nome: &str, origem_cep: Cep, destino_cep: Cep) -> Result<Self, DomainError> {
        let nome = nome.trim();
        if nome.is_empty() {
            return Err(DomainError::InvalidTripName("must not be empty".into()));
        }
        if nome.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::InvalidTripName(format!(
                "must be at most {MAX_NAME_LEN} characters"
            )));
        }
        Ok(Self {
            nome: nome.to_string(),
            origem_cep,
            destino_cep,
        })
    }
}
