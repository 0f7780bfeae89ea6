//! Trip service entry point

use std::sync::Arc;

use application::{
    ports::{DistancePort, GeocodePort, TripStorePort},
    services::TripService,
};
use infrastructure::{AppConfig, HttpDistanceClient, SqliteTripStore, create_pool};
use integration_brasilapi::BrasilApiClient;
use presentation_http::{server, state::TripState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "viagens_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Viagens API v{} starting", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {e}");
        AppConfig::default()
    });

    info!(
        host = %config.server.host,
        port = config.server.port,
        database = %config.database.path,
        distance_api = %config.distance_api.base_url,
        "Configuration loaded"
    );

    let pool = create_pool(&config.database)
        .map_err(|e| anyhow::anyhow!("Failed to open database: {e}"))?;
    let store: Arc<dyn TripStorePort> = Arc::new(SqliteTripStore::new(Arc::new(pool)));

    let geocode: Arc<dyn GeocodePort> = Arc::new(
        BrasilApiClient::new(config.geocode.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize CEP client: {e}"))?,
    );

    let distance: Arc<dyn DistancePort> =
        Arc::new(HttpDistanceClient::new(config.distance_api.clone()));

    let state = TripState {
        trip_service: Arc::new(TripService::new(store, Arc::clone(&geocode), distance)),
        geocode,
    };

    let app = presentation_http::trip_router(state);
    server::serve(app, &config.server).await
}
