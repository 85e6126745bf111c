use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use polyglot_core::AppConfig;

pub mod error;
pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/languages", get(handlers::list_languages))
        .route("/api/health", get(handlers::health_check))
        .route("/api/translate", post(handlers::translate))
        .route("/api/summarize", post(handlers::summarize))
        .route("/api/summarize/document", post(handlers::summarize_document))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::from_config(config.clone())?;
    if let Err(e) = state.services.warm_up().await {
        warn!("Models not loaded at start-up, retrying on first request: {}", e);
    }
    let app = create_app(state);

    info!(
        "Serving on http://{} (inference service {})",
        addr, config.models.endpoint
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Received shutdown signal");
        })
        .await?;

    Ok(())
}
