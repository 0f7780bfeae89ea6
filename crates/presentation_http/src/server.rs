//! Shared server bootstrap for the two binaries

use std::future::Future;
use std::time::Duration;

use axum::Router;
use infrastructure::ServerConfig;
use tokio::{net::TcpListener, signal, sync::oneshot};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Serve a router with tracing, permissive CORS, and graceful shutdown
pub async fn serve(app: Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{addr}");

    serve_with_shutdown(
        app,
        listener,
        Duration::from_secs(config.shutdown_timeout_secs),
        shutdown_signal(),
    )
    .await
}

/// Serve on an already-bound listener until `shutdown` resolves, then
/// drain in-flight connections for at most `drain_timeout` before closing
/// whatever remains.
pub async fn serve_with_shutdown(
    app: Router,
    listener: TcpListener,
    drain_timeout: Duration,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = app.layer(TraceLayer::new_for_http()).layer(cors_layer);

    let (drain_tx, drain_rx) = oneshot::channel::<()>();
    let graceful = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown.await;
        info!("Shutdown requested, draining connections");
        let _ = drain_tx.send(());
    });

    // Drop the serve future if the drain deadline passes, closing any
    // connection still open.
    tokio::select! {
        result = graceful => {
            result?;
            info!("Server shutdown complete");
        }
        () = async {
            // Pends forever until a shutdown is actually requested
            let _ = drain_rx.await;
            tokio::time::sleep(drain_timeout).await;
        } => {
            warn!(timeout = ?drain_timeout, "Drain deadline reached, closing remaining connections");
        }
    }

    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
