//! Application services

mod distance_service;
mod trip_service;

pub use distance_service::{CepDistance, DistanceService, round_km};
pub use trip_service::{TripDistance, TripService};
