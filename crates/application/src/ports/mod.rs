//! Port definitions for infrastructure adapters

mod distance_port;
mod geocode_port;
mod trip_store;

pub use distance_port::DistancePort;
pub use geocode_port::{GeoRecord, GeocodeError, GeocodePort};
pub use trip_store::{TripPatch, TripStorePort};

#[cfg(any(test, feature = "test-support"))]
pub use distance_port::MockDistancePort;
#[cfg(any(test, feature = "test-support"))]
pub use geocode_port::MockGeocodePort;
#[cfg(any(test, feature = "test-support"))]
pub use trip_store::MockTripStorePort;
