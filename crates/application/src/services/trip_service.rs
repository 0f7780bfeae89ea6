//! Trip orchestration service
//!
//! Creates trips after validating both postal codes against the geocoding
//! provider, exposes CRUD over the trip store, and computes distances by
//! delegating to the distance service over the network.

use std::sync::Arc;

use domain::entities::{Trip, TripDraft};
use domain::value_objects::Cep;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::error::{ApplicationError, CepField};
use crate::ports::{DistancePort, GeocodeError, GeocodePort, TripPatch, TripStorePort};

/// A freshly computed and persisted trip distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TripDistance {
    /// The trip the distance belongs to
    pub trip_id: i64,
    /// Distance in kilometers
    pub distancia_km: f64,
}

/// Trip use cases
#[derive(Clone)]
pub struct TripService {
    store: Arc<dyn TripStorePort>,
    geocode: Arc<dyn GeocodePort>,
    distance: Arc<dyn DistancePort>,
}

impl std::fmt::Debug for TripService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripService").finish_non_exhaustive()
    }
}

impl TripService {
    /// Create a new trip service
    #[must_use]
    pub fn new(
        store: Arc<dyn TripStorePort>,
        geocode: Arc<dyn GeocodePort>,
        distance: Arc<dyn DistancePort>,
    ) -> Self {
        Self {
            store,
            geocode,
            distance,
        }
    }

    /// Create a trip.
    ///
    /// The origin code is validated first, with coordinates required; a
    /// failure there short-circuits and the destination is never checked.
    /// Nothing is persisted unless both codes resolve with coordinates.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        nome: &str,
        origem_cep: &str,
        destino_cep: &str,
    ) -> Result<Trip, ApplicationError> {
        let origem = self.validate_cep(CepField::Origem, origem_cep).await?;
        let destino = self.validate_cep(CepField::Destino, destino_cep).await?;

        let draft = TripDraft::new(nome, origem, destino)?;
        let trip = self.store.insert(&draft).await?;
        info!(trip_id = trip.id, "Trip created");
        Ok(trip)
    }

    /// Normalize one postal code and require it to resolve with coordinates
    async fn validate_cep(&self, field: CepField, raw: &str) -> Result<Cep, ApplicationError> {
        let cep = Cep::parse(raw).map_err(|_| {
            warn!(field = %field, cep = raw, "CEP failed normalization");
            ApplicationError::cep_rejected(
                field,
                raw,
                GeocodeError::NotFound {
                    cep: raw.to_string(),
                },
            )
        })?;

        match self.geocode.lookup(cep.as_str(), true).await {
            Ok(_) => Ok(cep),
            Err(source) => {
                warn!(field = %field, cep = %cep, error = %source, "CEP rejected");
                Err(ApplicationError::cep_rejected(field, cep.as_str(), source))
            },
        }
    }

    /// All stored trips
    pub async fn list(&self) -> Result<Vec<Trip>, ApplicationError> {
        self.store.list().await
    }

    /// A trip by id
    pub async fn get(&self, id: i64) -> Result<Trip, ApplicationError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("trip {id}")))
    }

    /// Apply a partial update.
    ///
    /// Editing the postal codes does not recompute the stored distance.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i64, patch: &TripPatch) -> Result<Trip, ApplicationError> {
        self.store
            .update(id, patch)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("trip {id}")))
    }

    /// Delete a trip
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ApplicationError> {
        if self.store.delete(id).await? {
            Ok(())
        } else {
            Err(ApplicationError::NotFound(format!("trip {id}")))
        }
    }

    /// Compute the distance for a stored trip via the distance service and
    /// persist it.
    ///
    /// Any failure aborts before the store is touched; a stale or partial
    /// distance is never written.
    #[instrument(skip(self))]
    pub async fn compute_distance(&self, id: i64) -> Result<TripDistance, ApplicationError> {
        let trip = self.get(id).await?;

        let km = self
            .distance
            .distance_by_ceps(&trip.origem_cep, &trip.destino_cep)
            .await?;

        self.store
            .set_distance(id, km)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("trip {id}")))?;

        info!(trip_id = id, distancia_km = km, "Trip distance updated");
        Ok(TripDistance {
            trip_id: id,
            distancia_km: km,
        })
    }
}
