use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use briefing_client::{HackerNewsScraper, ScraperConfig};
use briefing_db::{Database, DatabaseConfig};
use briefing_server::routes;
use briefing_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("briefing=info".parse()?))
        .with_target(false)
        .init();

    let port = std::env::var("BRIEFING_SERVER_PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("0.0.0.0:{port}");

    tracing::info!("Starting Briefing API...");

    let db = Database::connect(&DatabaseConfig::from_env()?).await?;
    db.migrate().await?;

    let scraper_config = ScraperConfig::from_env()?;
    tracing::info!(
        source = %scraper_config.source_url,
        delay_secs = scraper_config.request_delay.as_secs(),
        "Scraper configured"
    );
    let scraper = HackerNewsScraper::from_config(&scraper_config)?;

    let state = Arc::new(AppState { db, scraper });

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down Briefing API...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
