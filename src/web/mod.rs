//! HTTP front end
//!
//! Thin axum layer over the game: it resolves the caller's session from the
//! cookie, runs one core operation on it and serializes the result.

use crate::config::Config;
use crate::game::TrackSource;
use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod sessions;

use sessions::SessionStore;

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<dyn TrackSource>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn TrackSource>) -> Self {
        let sessions = SessionStore::new(
            config.server.max_sessions,
            Duration::from_secs(config.server.session_ttl_secs),
            config.server.secret_key.clone(),
            config.game.max_attempts,
        );
        Self {
            config: Arc::new(config),
            source,
            sessions: Arc::new(sessions),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/static/app.js", get(handlers::app_js))
        .route("/health", get(handlers::health))
        .route("/start", post(handlers::start))
        .route("/hint", get(handlers::hint))
        .route("/guess", post(handlers::guess))
        .route("/history", get(handlers::history))
        .route("/reset", post(handlers::reset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: AppState, bind: &str) -> anyhow::Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("bind {bind}"))?;
    tracing::info!("songdle listening on http://{bind}");
    axum::serve(listener, app).await.context("http server")?;
    Ok(())
}
