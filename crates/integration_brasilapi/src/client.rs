//! BrasilAPI CEP client
//!
//! HTTP client for the BrasilAPI CEP v2 endpoint, implementing the
//! application's `GeocodePort` with bounded retries and the
//! NotFound / MissingCoordinates / Transport taxonomy.

use std::time::Duration;

use application::ports::{GeoRecord, GeocodeError, GeocodePort};
use async_trait::async_trait;
use domain::value_objects::Cep;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::CepResponse;
use crate::retry::{RetryPolicy, Retryable, with_retry};

/// HTTP statuses worth another attempt
const RETRYABLE_STATUSES: [StatusCode; 5] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// BrasilAPI client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrasilApiConfig {
    /// CEP v2 base URL (default: <https://brasilapi.com.br/api/cep/v2>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retry policy for transient failures
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_base_url() -> String {
    "https://brasilapi.com.br/api/cep/v2".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for BrasilApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            retry: RetryPolicy::default(),
        }
    }
}

/// One attempt against the provider, before taxonomy classification
#[derive(Debug, Error)]
enum FetchError {
    #[error("CEP not found upstream")]
    NotFound,

    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid payload: {0}")]
    Parse(String),
}

impl Retryable for FetchError {
    fn is_retryable(&self) -> bool {
        match self {
            // Connection and read failures, including timeouts
            Self::Request(_) => true,
            Self::Status(status) => RETRYABLE_STATUSES.contains(status),
            Self::NotFound | Self::Parse(_) => false,
        }
    }
}

/// BrasilAPI CEP v2 client.
///
/// The underlying `reqwest::Client` is a connection pool; the composition
/// root builds one and can share it across adapters.
#[derive(Debug, Clone)]
pub struct BrasilApiClient {
    client: Client,
    config: BrasilApiConfig,
}

impl BrasilApiClient {
    /// Create a client with its own connection pool
    ///
    /// # Errors
    ///
    /// Returns `GeocodeError::Transport` if the HTTP client cannot be built.
    pub fn new(config: BrasilApiConfig) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .build()
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, config))
    }

    /// Create a client over an injected, shared connection pool
    #[must_use]
    pub fn with_client(client: Client, config: BrasilApiConfig) -> Self {
        Self { client, config }
    }

    fn cep_url(&self, cep: &str) -> String {
        format!("{}/{cep}", self.config.base_url.trim_end_matches('/'))
    }

    /// One GET against the provider
    async fn fetch(&self, cep: &str) -> Result<CepResponse, FetchError> {
        let url = self.cep_url(cep);
        debug!(url = %url, "Fetching CEP");

        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response
            .json::<CepResponse>()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))
    }

    fn classify(cep: &Cep, err: FetchError) -> GeocodeError {
        match err {
            FetchError::NotFound => GeocodeError::NotFound {
                cep: cep.to_string(),
            },
            FetchError::Status(status) => {
                GeocodeError::Transport(format!("unexpected HTTP status {status} for CEP {cep}"))
            },
            FetchError::Request(e) => {
                GeocodeError::Transport(format!("request for CEP {cep} failed: {e}"))
            },
            FetchError::Parse(msg) => {
                GeocodeError::Transport(format!("invalid payload for CEP {cep}: {msg}"))
            },
        }
    }
}

#[async_trait]
impl GeocodePort for BrasilApiClient {
    #[instrument(skip(self), fields(cep = %raw_cep))]
    async fn lookup(
        &self,
        raw_cep: &str,
        require_coordinates: bool,
    ) -> Result<GeoRecord, GeocodeError> {
        // Structurally invalid codes never reach the network
        let cep = Cep::parse(raw_cep).map_err(|_| GeocodeError::NotFound {
            cep: raw_cep.to_string(),
        })?;

        let response = with_retry(&self.config.retry, || self.fetch(cep.as_str()))
            .await
            .map_err(|e| Self::classify(&cep, e))?;

        let record = response.into_record(cep.as_str());

        // Only after a successful fetch; never conflated with NotFound
        if require_coordinates && !record.has_coordinates() {
            return Err(GeocodeError::MissingCoordinates {
                cep: cep.to_string(),
            });
        }

        Ok(record)
    }
}
