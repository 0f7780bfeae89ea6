//! HTTP request handlers

pub mod cep;
pub mod distance;
pub mod trips;
