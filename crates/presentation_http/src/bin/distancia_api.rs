//! Distance service entry point

use std::sync::Arc;

use application::{ports::GeocodePort, services::DistanceService};
use infrastructure::{AppConfig, ServerConfig};
use integration_brasilapi::BrasilApiClient;
use presentation_http::{server, state::DistanceState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default port for the distance service
const DEFAULT_PORT: u16 = 8001;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "distancia_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Distancia API v{} starting", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_with_port(DEFAULT_PORT).unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {e}");
        AppConfig {
            server: ServerConfig {
                port: DEFAULT_PORT,
                ..ServerConfig::default()
            },
            ..AppConfig::default()
        }
    });

    info!(
        host = %config.server.host,
        port = config.server.port,
        provider = %config.geocode.base_url,
        "Configuration loaded"
    );

    let geocode: Arc<dyn GeocodePort> = Arc::new(
        BrasilApiClient::new(config.geocode.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize CEP client: {e}"))?,
    );

    let state = DistanceState {
        distance_service: Arc::new(DistanceService::new(geocode)),
    };

    let app = presentation_http::distance_router(state);
    server::serve(app, &config.server).await
}
