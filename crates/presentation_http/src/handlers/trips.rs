//! Trip CRUD handlers

use application::error::CepField;
use application::ports::{GeocodeError, TripPatch};
use application::services::TripDistance;
use axum::{
    Json,
    extract::{Path, State},
    extract::rejection::JsonRejection,
    http::StatusCode,
};
use domain::entities::Trip;
use domain::value_objects::Cep;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{error::ApiError, state::TripState};

/// Request body for `POST /trips`
#[derive(Debug, Clone, Deserialize)]
pub struct TripIn {
    /// Display name
    pub nome: String,
    /// Origin postal code
    pub origem_cep: String,
    /// Destination postal code
    pub destino_cep: String,
}

/// Request body for `PUT /trips/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripUpdateIn {
    /// New display name
    pub nome: Option<String>,
    /// New origin postal code
    pub origem_cep: Option<String>,
    /// New destination postal code
    pub destino_cep: Option<String>,
}

/// A trip on the wire
#[derive(Debug, Clone, Serialize)]
pub struct TripOut {
    /// Store-assigned identifier
    pub id: i64,
    /// Display name
    pub nome: String,
    /// Origin postal code
    pub origem_cep: String,
    /// Destination postal code
    pub destino_cep: String,
    /// Last computed distance, if any
    pub distancia_km: Option<f64>,
}

impl From<Trip> for TripOut {
    fn from(trip: Trip) -> Self {
        Self {
            id: trip.id,
            nome: trip.nome,
            origem_cep: trip.origem_cep.into(),
            destino_cep: trip.destino_cep.into(),
            distancia_km: trip.distancia_km,
        }
    }
}

/// Service banner
pub async fn root() -> Json<Value> {
    Json(json!({"message": "Viagens API ok"}))
}

/// Create a trip after both postal codes resolve with coordinates
pub async fn create(
    State(state): State<TripState>,
    payload: Result<Json<TripIn>, JsonRejection>,
) -> Result<(StatusCode, Json<TripOut>), ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::InvalidInput(e.body_text()))?;

    let trip = state
        .trip_service
        .create(&req.nome, &req.origem_cep, &req.destino_cep)
        .await?;

    Ok((StatusCode::CREATED, Json(trip.into())))
}

/// All stored trips
pub async fn list(State(state): State<TripState>) -> Result<Json<Value>, ApiError> {
    let trips = state.trip_service.list().await?;
    let items: Vec<TripOut> = trips.into_iter().map(TripOut::from).collect();
    Ok(Json(json!({"items": items})))
}

/// A trip by id
pub async fn get(
    State(state): State<TripState>,
    Path(id): Path<i64>,
) -> Result<Json<TripOut>, ApiError> {
    let trip = state.trip_service.get(id).await?;
    Ok(Json(trip.into()))
}

/// Partial update. Edited postal codes are normalized but the stored
/// distance is not recomputed.
pub async fn update(
    State(state): State<TripState>,
    Path(id): Path<i64>,
    payload: Result<Json<TripUpdateIn>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::InvalidInput(e.body_text()))?;

    let patch = TripPatch {
        nome: req.nome,
        origem_cep: req
            .origem_cep
            .map(|raw| parse_patch_cep(CepField::Origem, &raw))
            .transpose()?,
        destino_cep: req
            .destino_cep
            .map(|raw| parse_patch_cep(CepField::Destino, &raw))
            .transpose()?,
    };

    state.trip_service.update(id, &patch).await?;
    Ok(Json(json!({"ok": true})))
}

/// Delete a trip
pub async fn delete(
    State(state): State<TripState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    state.trip_service.delete(id).await?;
    Ok(Json(json!({"ok": true})))
}

/// Compute and persist the trip's distance
pub async fn distance(
    State(state): State<TripState>,
    Path(id): Path<i64>,
) -> Result<Json<TripDistance>, ApiError> {
    let result = state.trip_service.compute_distance(id).await?;
    Ok(Json(result))
}

fn parse_patch_cep(field: CepField, raw: &str) -> Result<Cep, ApiError> {
    Cep::parse(raw).map_err(|_| ApiError::CepRejected {
        field,
        cep: raw.to_string(),
        source: GeocodeError::NotFound {
            cep: raw.to_string(),
        },
    })
}
