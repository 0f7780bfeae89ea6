//! Postal-code resolution handler

use application::ports::GeoRecord;
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{error::ApiError, state::TripState};

/// Resolve a postal code to its record.
///
/// Plain lookup: a found code without coordinates still returns its record.
pub async fn resolve(
    State(state): State<TripState>,
    Path(cep): Path<String>,
) -> Result<Json<GeoRecord>, ApiError> {
    let record = state.geocode.lookup(&cep, false).await?;
    Ok(Json(record))
}
