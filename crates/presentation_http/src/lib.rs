//! HTTP presentation layer
//!
//! Routers, handlers, and error mapping for the two service binaries:
//! `distancia-api` (distance queries) and `viagens-api` (trip CRUD).

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::{distance_router, trip_router};
pub use state::{DistanceState, TripState};
