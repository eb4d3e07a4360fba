//! HTTP server implementation using Axum.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{
    Json, Router,
    routing::{get, post},
};
use sitechat_core::config::SiteChatConfig;
use sitechat_knowledge::{Indexer, Matcher, SharedIndex};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::routes::GENERIC_FAILURE;

/// Shared state for the gateway server.
pub struct AppState {
    pub config: SiteChatConfig,
    /// Current index snapshot, swapped on reindex.
    pub index: Arc<SharedIndex>,
    pub indexer: Arc<Indexer>,
    pub matcher: Matcher,
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Build state from config. The index starts empty; call `reindex` before serving.
    pub fn new(config: SiteChatConfig) -> anyhow::Result<Self> {
        let indexer = Indexer::from_config(&config.site)?;
        let matcher = Matcher::new(config.site.fallback_context.clone());
        Ok(Self {
            config,
            index: Arc::new(SharedIndex::new()),
            indexer: Arc::new(indexer),
            matcher,
            start_time: std::time::Instant::now(),
        })
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    build_router_from_arc(Arc::new(state))
}

pub fn build_router_from_arc(shared: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/api/rag", post(super::routes::rag))
        .route("/api/reindex", post(super::routes::reindex))
        .route("/api/pages", get(super::routes::list_pages))
        .route("/health", get(super::routes::health_check));

    // Static site, with the landing page for any unknown path (client-side routing)
    let site = &shared.config.site;
    let static_files =
        ServeDir::new(site.root_dir()).fallback(ServeFile::new(site.landing_path()));

    with_layers(api.fallback_service(static_files)).with_state(shared)
}

fn with_layers(router: Router<Arc<AppState>>) -> Router<Arc<AppState>> {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn cors_layer() -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers(AnyOrigin)
        .max_age(std::time::Duration::from_secs(3600));

    // Example: SITECHAT_CORS_ORIGINS=https://example.edu,https://www.example.edu
    if let Ok(origins_str) = std::env::var("SITECHAT_CORS_ORIGINS") {
        let origins: Vec<_> = origins_str
            .split(',')
            .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
            .collect();
        cors.allow_origin(origins)
    } else {
        cors.allow_origin(AnyOrigin)
    }
}

/// Convert a handler panic into the generic 500 JSON error.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {detail}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": GENERIC_FAILURE})),
    )
        .into_response()
}

/// Index the site, then start the HTTP server.
pub async fn start(config: SiteChatConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let state = Arc::new(AppState::new(config)?);

    let indexing = state.clone();
    let pages = tokio::task::spawn_blocking(move || indexing.index.reindex(&indexing.indexer)).await??;
    if pages == 0 {
        tracing::warn!("No pages indexed; answers will use the fallback context");
    }

    let app = build_router_from_arc(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
