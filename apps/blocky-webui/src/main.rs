use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api_client;
mod config;
mod format;
mod handlers;
mod reltime;
mod router;
mod shell;
mod table;
mod view;
mod views;

use api_client::ApiClient;
use config::WebuiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blocky_webui=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load config
    let config = WebuiConfig::load()?;
    tracing::info!("Web UI starting...");
    tracing::info!("API URL: {}", config.api_url);

    let api = ApiClient::new(config.api_url.clone())?;
    tracing::debug!("Blocky API client ready for {}", api.base_url());

    let state = AppState {
        config: config.clone(),
        router: Arc::new(router::Router::new(Arc::new(api))),
    };

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    tracing::info!("Web UI listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

#[derive(Clone)]
pub struct AppState {
    pub config: WebuiConfig,
    pub router: Arc<router::Router>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Views
        .route("/", get(handlers::page::page_handler))
        .route("/search", get(handlers::page::search_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
