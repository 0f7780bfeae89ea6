//! BrasilAPI CEP v2 response payloads

use application::ports::GeoRecord;
use serde::{Deserialize, Deserializer};

/// Top-level CEP v2 response. All fields are optional; the provider omits
/// what it does not know.
#[derive(Debug, Clone, Deserialize)]
pub struct CepResponse {
    pub cep: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub street: Option<String>,
    pub service: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
}

/// GeoJSON-ish location wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

/// Coordinates as sent by the provider: numbers, numeric text, or empty
/// strings depending on the upstream source.
#[derive(Debug, Clone, Deserialize)]
pub struct Coordinates {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
}

/// Accept a number, a numeric string, or nothing. Empty and non-numeric
/// strings map to absent rather than a defaulted zero.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

impl CepResponse {
    /// Flatten into a `GeoRecord`, falling back to the queried code when
    /// the provider omits the `cep` field.
    pub fn into_record(self, queried_cep: &str) -> GeoRecord {
        let (latitude, longitude) = self
            .location
            .and_then(|l| l.coordinates)
            .map_or((None, None), |c| (c.latitude, c.longitude));

        GeoRecord {
            cep: self.cep.unwrap_or_else(|| queried_cep.to_string()),
            latitude,
            longitude,
            city: self.city,
            state: self.state,
            street: self.street,
            neighborhood: self.neighborhood,
            service: self.service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_coordinates() {
        let json = r#"{
            "cep": "01310930",
            "state": "SP",
            "city": "São Paulo",
            "neighborhood": "Bela Vista",
            "street": "Avenida Paulista",
            "service": "open-cep",
            "location": {
                "type": "Point",
                "coordinates": {"latitude": -23.55, "longitude": -46.63}
            }
        }"#;
        let response: CepResponse = serde_json::from_str(json).expect("parse");
        let record = response.into_record("01310930");
        assert_eq!(record.latitude, Some(-23.55));
        assert_eq!(record.longitude, Some(-46.63));
        assert_eq!(record.city.as_deref(), Some("São Paulo"));
        assert_eq!(record.service.as_deref(), Some("open-cep"));
    }

    #[test]
    fn parses_coordinates_as_text() {
        let json = r#"{
            "cep": "01310930",
            "location": {"coordinates": {"latitude": "-23.55", "longitude": "-46.63"}}
        }"#;
        let response: CepResponse = serde_json::from_str(json).expect("parse");
        let record = response.into_record("01310930");
        assert_eq!(record.latitude, Some(-23.55));
        assert_eq!(record.longitude, Some(-46.63));
    }

    #[test]
    fn empty_string_coordinates_are_absent() {
        let json = r#"{
            "cep": "01310930",
            "location": {"coordinates": {"latitude": "", "longitude": ""}}
        }"#;
        let response: CepResponse = serde_json::from_str(json).expect("parse");
        let record = response.into_record("01310930");
        assert_eq!(record.latitude, None);
        assert_eq!(record.longitude, None);
    }

    #[test]
    fn missing_location_yields_no_coordinates() {
        let json = r#"{"cep": "01310930", "city": "São Paulo"}"#;
        let response: CepResponse = serde_json::from_str(json).expect("parse");
        let record = response.into_record("01310930");
        assert!(!record.has_coordinates());
        // No defaulting: absent stays absent
        assert_eq!(record.state, None);
        assert_eq!(record.street, None);
    }

    #[test]
    fn missing_cep_falls_back_to_queried_code() {
        let json = r#"{"city": "São Paulo"}"#;
        let response: CepResponse = serde_json::from_str(json).expect("parse");
        let record = response.into_record("01310930");
        assert_eq!(record.cep, "01310930");
    }

    #[test]
    fn non_numeric_coordinate_text_is_absent() {
        let json = r#"{
            "cep": "01310930",
            "location": {"coordinates": {"latitude": "n/a", "longitude": -46.63}}
        }"#;
        let response: CepResponse = serde_json::from_str(json).expect("parse");
        let record = response.into_record("01310930");
        assert_eq!(record.latitude, None);
        assert_eq!(record.longitude, Some(-46.63));
    }
}
