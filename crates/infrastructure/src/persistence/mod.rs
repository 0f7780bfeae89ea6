//! SQLite persistence

mod connection;
mod migrations;
mod trip_store;

pub use connection::{ConnectionPool, DatabaseError, PooledConn, create_pool};
pub use trip_store::SqliteTripStore;
