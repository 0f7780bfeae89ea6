//! API error handling
//!
//! Maps the application and geocoding error taxonomies onto wire responses.
//! The three geocode cases stay distinct all the way to the client: each
//! carries its own error code, and only transport failures turn into a 502.

use application::error::{ApplicationError, CepField};
use application::ports::GeocodeError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A trip postal code was rejected, annotated with the failing field
    #[error("{field} rejected")]
    CepRejected {
        /// Which field failed
        field: CepField,
        /// The postal code as submitted
        cep: String,
        /// The taxonomy case behind the rejection
        source: GeocodeError,
    },

    /// A standalone postal-code lookup failed
    #[error(transparent)]
    Geocode(GeocodeError),

    /// Requested entity does not exist
    #[error("Not found")]
    NotFound,

    /// A collaborating service failed
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Wire code for a geocode taxonomy case
const fn geocode_code(err: &GeocodeError) -> &'static str {
    match err {
        GeocodeError::NotFound { .. } => "invalid_cep",
        GeocodeError::MissingCoordinates { .. } => "missing_coordinates",
        GeocodeError::Transport(_) => "cep_lookup_failed",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::InvalidInput(detail) => (
                StatusCode::BAD_REQUEST,
                json!({"error": "invalid_input", "detail": detail}),
            ),
            Self::CepRejected { field, cep, source } => {
                let code = geocode_code(&source);
                // The transport case omits the cep on the wire
                let body = match source {
                    GeocodeError::Transport(_) => {
                        json!({"error": code, "field": field.as_str()})
                    },
                    GeocodeError::NotFound { .. } | GeocodeError::MissingCoordinates { .. } => {
                        json!({"error": code, "field": field.as_str(), "cep": cep})
                    },
                };
                (StatusCode::BAD_REQUEST, body)
            },
            Self::Geocode(source) => {
                let code = geocode_code(&source);
                match source {
                    GeocodeError::NotFound { cep } | GeocodeError::MissingCoordinates { cep } => {
                        (StatusCode::BAD_REQUEST, json!({"error": code, "cep": cep}))
                    },
                    GeocodeError::Transport(_) => {
                        (StatusCode::BAD_GATEWAY, json!({"error": code}))
                    },
                }
            },
            Self::NotFound => (StatusCode::NOT_FOUND, json!({"error": "not found"})),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, json!({"error": "upstream_error"})),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "internal_error"}),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::InvalidInput(e.to_string()),
            ApplicationError::CepRejected { field, cep, source } => {
                Self::CepRejected { field, cep, source }
            },
            ApplicationError::NotFound(_) => Self::NotFound,
            ApplicationError::ExternalService(msg) => Self::Upstream(msg),
            ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<GeocodeError> for ApiError {
    fn from(err: GeocodeError) -> Self {
        Self::Geocode(err)
    }
}
