//! Read-only REST API over the league history database.
//!
//! Every request opens its own connection on a blocking thread; nothing is
//! shared between requests except the database path.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::{
    error::HistoryError,
    storage::{Franchise, LedgerDatabase, League, Season},
};


/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub database_path: PathBuf,
}

#[derive(Clone)]
pub struct AppState {
    database_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            database_path: Arc::new(database_path),
        }
    }

    /// Run `query` against a fresh connection on the blocking pool.
    async fn with_db<T, F>(&self, query: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&LedgerDatabase) -> crate::Result<T> + Send + 'static,
    {
        let path = Arc::clone(&self.database_path);
        tokio::task::spawn_blocking(move || {
            let db = LedgerDatabase::open(&path)?;
            query(&db)
        })
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] HistoryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));
        (status, body).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /
async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Fantasy League History API",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

/// GET /leagues
async fn get_leagues(State(state): State<AppState>) -> Result<Json<Vec<League>>, ApiError> {
    let leagues = state.with_db(|db| db.list_leagues()).await?;
    Ok(Json(leagues))
}

/// GET /leagues/{league_id}/franchises
async fn get_franchises(
    State(state): State<AppState>,
    Path(league_id): Path<i64>,
) -> Result<Json<Vec<Franchise>>, ApiError> {
    let franchises = state
        .with_db(move |db| db.list_franchises(league_id))
        .await?;
    Ok(Json(franchises))
}

/// GET /leagues/{league_id}/seasons
async fn get_seasons(
    State(state): State<AppState>,
    Path(league_id): Path<i64>,
) -> Result<Json<Vec<Season>>, ApiError> {
    let seasons = state.with_db(move |db| db.list_seasons(league_id)).await?;
    Ok(Json(seasons))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/leagues", get(get_leagues))
        .route("/leagues/{league_id}/franchises", get(get_franchises))
        .route("/leagues/{league_id}/seasons", get(get_seasons))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl+C / SIGTERM.
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let app = router(AppState::new(config.database_path.clone()));

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        database = %config.database_path.display(),
        "server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
