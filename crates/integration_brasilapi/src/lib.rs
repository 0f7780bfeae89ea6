//! BrasilAPI CEP integration
//!
//! Client for the BrasilAPI CEP v2 endpoint
//! (<https://brasilapi.com.br/api/cep/v2>). Resolves Brazilian postal codes
//! to coordinates and address metadata, with bounded retries on transient
//! failures.

pub mod client;
mod models;
pub mod retry;

pub use client::{BrasilApiClient, BrasilApiConfig};
pub use retry::{RetryPolicy, Retryable, with_retry};
