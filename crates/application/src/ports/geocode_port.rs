//! Postal-code geocoding port
//!
//! Defines the interface for resolving a CEP to coordinates and address
//! metadata through an external provider.

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(any(test, feature = "test-support"))]
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of a successful postal-code lookup.
///
/// Every field except `cep` is optional: the provider omits what it does
/// not know, and a found code may carry no geocoding data at all. Absent
/// fields stay absent; nothing is defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRecord {
    /// Canonical postal code as reported by the provider
    pub cep: String,
    /// Latitude in degrees, if geocoded
    pub latitude: Option<f64>,
    /// Longitude in degrees, if geocoded
    pub longitude: Option<f64>,
    /// City name
    pub city: Option<String>,
    /// State abbreviation
    pub state: Option<String>,
    /// Street name
    pub street: Option<String>,
    /// Neighborhood name
    pub neighborhood: Option<String>,
    /// Which upstream service resolved the code
    pub service: Option<String>,
}

impl GeoRecord {
    /// Both coordinates, if present
    #[must_use]
    pub fn coordinates(&self) -> Option<GeoLocation> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GeoLocation::new(lat, lon)),
            _ => None,
        }
    }

    /// Whether latitude and longitude are both present
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// Lookup failure taxonomy. Cases are distinct and never merged; callers
/// match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// Postal code does not exist, or does not normalize to 8 digits
    #[error("CEP not found: {cep}")]
    NotFound {
        /// The offending postal code
        cep: String,
    },

    /// Postal code exists but carries no coordinate data
    #[error("CEP {cep} has no coordinates")]
    MissingCoordinates {
        /// The postal code without coordinates
        cep: String,
    },

    /// Network failure, timeout, unexpected HTTP status, or unparseable
    /// payload, after internal retries were exhausted
    #[error("CEP lookup failed: {0}")]
    Transport(String),
}

/// Port for postal-code resolution
#[cfg_attr(any(test, feature = "test-support"), automock)]
#[async_trait]
pub trait GeocodePort: Send + Sync {
    /// Resolve a raw postal code to a `GeoRecord`.
    ///
    /// The code is normalized before lookup. With `require_coordinates`
    /// a successful fetch whose record lacks either coordinate fails with
    /// `MissingCoordinates`; the check never masks a `NotFound`.
    async fn lookup(
        &self,
        raw_cep: &str,
        require_coordinates: bool,
    ) -> Result<GeoRecord, GeocodeError>;
}
