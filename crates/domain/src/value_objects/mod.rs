//! Value objects

mod cep;
mod geo_location;

pub use cep::Cep;
pub use geo_location::GeoLocation;
