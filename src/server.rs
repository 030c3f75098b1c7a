//! HTTP surface of the proxy.

pub mod handlers;
pub mod response;

use crate::{config::Settings, error::ProxyResult, ncaa::client::NcaaClient, storage::ResponseCache};
use axum::{routing::get, Router};
use http::{header, Method};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Shared by every request: one upstream client (and so one rate limit),
/// one cache.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub client: Arc<NcaaClient>,
    pub cache: Arc<ResponseCache>,
}

impl AppState {
    pub fn new(settings: Settings) -> ProxyResult<Self> {
        let client = NcaaClient::new(&settings)?;
        let cache = ResponseCache::from_settings(&settings);
        Ok(AppState {
            settings: Arc::new(settings),
            client: Arc::new(client),
            cache: Arc::new(cache),
        })
    }
}

// `get` alone would also answer HEAD and reach upstream.
fn data_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/rankings",
            get(handlers::rankings)
                .head(handlers::method_not_allowed)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/stats/{category}",
            get(handlers::stats)
                .head(handlers::method_not_allowed)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/games",
            get(handlers::games_current)
                .head(handlers::method_not_allowed)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/games/{date}",
            get(handlers::games)
                .head(handlers::method_not_allowed)
                .fallback(handlers::method_not_allowed),
        )
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(data_routes())
        .nest("/api/softball", data_routes())
        .route("/health", get(handlers::health))
        .route("/api/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

pub async fn serve(settings: Settings) -> ProxyResult<()> {
    let address = format!("{}:{}", settings.bind_address, settings.port);
    info!(
        "Cache TTL {}s, cache {}",
        settings.cache_ttl,
        match settings.cache_enabled {
            true => "enabled",
            false => "disabled",
        }
    );
    let state = AppState::new(settings)?;

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Could not listen for shutdown signal. {e}");
        // Never resolve: keep serving.
        std::future::pending::<()>().await;
    }
}
