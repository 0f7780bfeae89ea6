//! Application state shared across handlers

use std::sync::Arc;

use application::ports::GeocodePort;
use application::services::{DistanceService, TripService};

/// State for the distance service
#[derive(Clone)]
pub struct DistanceState {
    /// Distance query service
    pub distance_service: Arc<DistanceService>,
}

impl std::fmt::Debug for DistanceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistanceState").finish_non_exhaustive()
    }
}

/// State for the trip service
#[derive(Clone)]
pub struct TripState {
    /// Trip use cases
    pub trip_service: Arc<TripService>,
    /// Direct postal-code lookups for `/ceps/{cep}`
    pub geocode: Arc<dyn GeocodePort>,
}

impl std::fmt::Debug for TripState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripState").finish_non_exhaustive()
    }
}
