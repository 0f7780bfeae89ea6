//! Distance query handlers

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use domain::value_objects::GeoLocation;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{error::ApiError, state::DistanceState};

/// A coordinate pair as submitted by the client
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CoordsIn {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

impl From<CoordsIn> for GeoLocation {
    fn from(c: CoordsIn) -> Self {
        Self::new(c.lat, c.lon)
    }
}

/// Request body for `POST /distance/by-coords`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ByCoordsRequest {
    /// Origin point
    pub origem: CoordsIn,
    /// Destination point
    pub destino: CoordsIn,
}

/// Request body for `POST /distance/by-cep`
#[derive(Debug, Clone, Deserialize)]
pub struct ByCepRequest {
    /// Origin postal code
    pub origem: String,
    /// Destination postal code
    pub destino: String,
}

/// Distance-only response
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DistanceResponse {
    /// Distance in kilometers, rounded to 3 decimals
    pub distancia_km: f64,
}

/// Service banner
pub async fn root() -> Json<Value> {
    Json(json!({"message": "Distancia API ok"}))
}

/// Distance between two raw coordinate pairs
pub async fn by_coords(
    State(state): State<DistanceState>,
    payload: Result<Json<ByCoordsRequest>, JsonRejection>,
) -> Result<Json<DistanceResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::InvalidInput(e.body_text()))?;

    let distancia_km = state
        .distance_service
        .by_coordinates(req.origem.into(), req.destino.into());

    Ok(Json(DistanceResponse { distancia_km }))
}

/// Distance between two postal codes, with the resolved records
pub async fn by_cep(
    State(state): State<DistanceState>,
    payload: Result<Json<ByCepRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::InvalidInput(e.body_text()))?;

    let result = state
        .distance_service
        .by_cep(&req.origem, &req.destino)
        .await?;

    Ok(Json(json!({
        "distancia_km": result.distancia_km,
        "origem": result.origem,
        "destino": result.destino,
    })))
}
