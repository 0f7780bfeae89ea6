//! Application layer - Use cases and orchestration
//!
//! Contains application-level logic, service orchestration, and port
//! definitions. Orchestrates domain objects and infrastructure adapters.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, CepField};
pub use ports::*;
pub use services::*;
