//! HTTP client for the distance service
//!
//! Adapter for `DistancePort` that calls the distance service's
//! `POST /distance/by-cep` endpoint. Provider retries happen inside the
//! distance service itself, so this client does not retry.

use std::time::Duration;

use application::error::ApplicationError;
use application::ports::DistancePort;
use async_trait::async_trait;
use domain::value_objects::Cep;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Distance service client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceApiConfig {
    /// Base URL of the distance service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8001".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for DistanceApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Serialize)]
struct ByCepRequest<'a> {
    origem: &'a str,
    destino: &'a str,
}

#[derive(Deserialize)]
struct ByCepResponse {
    distancia_km: f64,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// HTTP adapter for the distance service
#[derive(Debug, Clone)]
pub struct HttpDistanceClient {
    client: Client,
    config: DistanceApiConfig,
}

impl HttpDistanceClient {
    /// Create a new client with its own connection pool
    #[must_use]
    pub fn new(config: DistanceApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Create a client sharing an existing connection pool
    #[must_use]
    pub const fn with_client(client: Client, config: DistanceApiConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl DistancePort for HttpDistanceClient {
    #[instrument(skip(self), fields(origem = %origem, destino = %destino))]
    async fn distance_by_ceps(
        &self,
        origem: &Cep,
        destino: &Cep,
    ) -> Result<f64, ApplicationError> {
        let url = format!("{}/distance/by-cep", self.config.base_url);
        let body = ByCepRequest {
            origem: origem.as_str(),
            destino: destino.as_str(),
        };

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Distance service request failed");
                ApplicationError::ExternalService(format!("distance service unreachable: {e}"))
            })?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            let error = response
                .json::<ErrorBody>()
                .await
                .unwrap_or_default()
                .error
                .unwrap_or_else(|| "invalid request".to_string());
            return Err(ApplicationError::ExternalService(format!(
                "distance service rejected request: {error}"
            )));
        }
        if !status.is_success() {
            warn!(status = %status, "Distance service returned an error status");
            return Err(ApplicationError::ExternalService(format!(
                "distance service returned status {status}"
            )));
        }

        let parsed: ByCepResponse = response.json().await.map_err(|e| {
            ApplicationError::ExternalService(format!("distance service response malformed: {e}"))
        })?;

        debug!(distancia_km = parsed.distancia_km, "Distance computed");
        Ok(parsed.distancia_km)
    }
}
