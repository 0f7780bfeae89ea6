//! Outbound HTTP adapters

mod distance_client;

pub use distance_client::{DistanceApiConfig, HttpDistanceClient};
