use anyhow::Context;
use dotenvy::dotenv;
use tracing::{info, warn};

use freelearn::freelearn_config::AppConfig;
use freelearn::logging::init_tracing;
use freelearn::router::init_router;
use freelearn::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(config.log_dir.as_deref()).context("failed to set up logging")?;

    if !config.jwt.has_secret() {
        warn!("JWT_SECRET is not set; login and authenticated routes will fail");
    }

    let state = AppState::connect(&config)
        .await
        .context("failed to initialize database")?;
    let app = init_router(state.clone());

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    info!(address = %address, "Server running");
    info!("Swagger UI available at http://{address}/swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    state.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
