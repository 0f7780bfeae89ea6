//! Distance computation service
//!
//! Answers the two supported query modes: distance between raw coordinate
//! pairs, and distance between two postal codes resolved through the
//! geocoding port.

use std::sync::Arc;

use domain::value_objects::GeoLocation;
use serde::Serialize;
use tracing::instrument;

use crate::ports::{GeoRecord, GeocodeError, GeocodePort};

/// Round a kilometer value to 3 decimal places.
///
/// Applied once, at the service boundary; the haversine itself is never
/// pre-rounded.
#[must_use]
pub fn round_km(km: f64) -> f64 {
    (km * 1000.0).round() / 1000.0
}

/// Distance between two resolved postal codes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CepDistance {
    /// Distance in kilometers, rounded to 3 decimals
    pub distancia_km: f64,
    /// Resolved origin record
    pub origem: GeoRecord,
    /// Resolved destination record
    pub destino: GeoRecord,
}

/// Distance query service
#[derive(Clone)]
pub struct DistanceService {
    geocode: Arc<dyn GeocodePort>,
}

impl std::fmt::Debug for DistanceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistanceService").finish_non_exhaustive()
    }
}

impl DistanceService {
    /// Create a new distance service over a geocoding port
    #[must_use]
    pub fn new(geocode: Arc<dyn GeocodePort>) -> Self {
        Self { geocode }
    }

    /// Distance between two coordinate pairs, rounded to 3 decimals.
    ///
    /// No lookup involved; payload validation happens at the HTTP edge.
    #[must_use]
    pub fn by_coordinates(&self, origem: GeoLocation, destino: GeoLocation) -> f64 {
        round_km(origem.distance_km(&destino))
    }

    /// Distance between two postal codes.
    ///
    /// Both codes are resolved with plain lookups (coordinates not
    /// pre-required); a record that turns out to have no coordinates fails
    /// as `MissingCoordinates` when the calculation needs them. Lookup
    /// failures propagate with their taxonomy unchanged.
    #[instrument(skip(self))]
    pub async fn by_cep(&self, origem: &str, destino: &str) -> Result<CepDistance, GeocodeError> {
        let origem = self.geocode.lookup(origem, false).await?;
        let destino = self.geocode.lookup(destino, false).await?;

        let from = coordinates_of(&origem)?;
        let to = coordinates_of(&destino)?;

        Ok(CepDistance {
            distancia_km: round_km(from.distance_km(&to)),
            origem,
            destino,
        })
    }
}

fn coordinates_of(record: &GeoRecord) -> Result<GeoLocation, GeocodeError> {
    record
        .coordinates()
        .ok_or_else(|| GeocodeError::MissingCoordinates {
            cep: record.cep.clone(),
        })
}
