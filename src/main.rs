use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rust_jcdm_webhook::config::Config;
use rust_jcdm_webhook::webhook_handler::{self, AppState};
use rust_jcdm_webhook::zoho_client::ZohoClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_jcdm_webhook=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize Zoho client (shared connection pool, per-request tokens)
    let zoho = ZohoClient::new(&config)?;
    tracing::info!("Zoho client initialized: {}", config.zoho_api_url);

    let port = config.port;
    let state = Arc::new(AppState { config, zoho });

    let app = webhook_handler::router(state)
        .layer(
            ServiceBuilder::new()
                // Lead payloads are tiny; 1MB is already generous
                .layer(RequestBodyLimitLayer::new(1024 * 1024)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
