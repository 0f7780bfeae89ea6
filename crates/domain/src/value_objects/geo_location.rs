//! Geographic location value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean Earth radius in kilometers (IUGG value)
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// A geographic location with latitude and longitude in decimal degrees.
///
/// Coordinates are taken as-is from callers; beyond being numeric no range
/// validation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl GeoLocation {
    /// Create a new location
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another location in kilometers.
    ///
    /// Haversine formula over the mean Earth radius. The intermediate value
    /// is clamped to [0, 1] so floating-point drift at antipodal-adjacent
    /// inputs cannot push `asin` out of its domain.
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        let lat1_rad = self.latitude.to_radians();
        let lat2_rad = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (lat1_rad.cos() * lat2_rad.cos()).mul_add(
            (delta_lon / 2.0).sin().powi(2),
            (delta_lat / 2.0).sin().powi(2),
        );
        let a = a.clamp(0.0, 1.0);

        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
