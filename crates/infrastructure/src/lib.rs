//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: SQLite trip storage,
//! the inter-service distance HTTP client, and configuration loading.

pub mod config;
pub mod http;
pub mod persistence;

pub use config::{AppConfig, DatabaseConfig, ServerConfig};
pub use http::{DistanceApiConfig, HttpDistanceClient};
pub use persistence::{ConnectionPool, SqliteTripStore, create_pool};
