//! HTTP server wiring: shared state, router and listener.

use crate::error::ApiError;
use crate::routes;
use actionnote_core::db::open_db;
use actionnote_core::{ChatBackend, ServiceError, Settings};
use anyhow::{Context, Result};
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use log::info;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tower_http::services::ServeDir;

pub type SharedState = Arc<AppState>;

/// Application state shared across handlers.
pub struct AppState {
    pub settings: Settings,
    db: Arc<Mutex<Connection>>,
    llm: Arc<dyn ChatBackend + Send + Sync>,
}

impl AppState {
    pub fn new(settings: Settings, conn: Connection, llm: Arc<dyn ChatBackend + Send + Sync>) -> Self {
        Self {
            settings,
            db: Arc::new(Mutex::new(conn)),
            llm,
        }
    }

    pub fn llm(&self) -> Arc<dyn ChatBackend + Send + Sync> {
        Arc::clone(&self.llm)
    }

    /// Runs `f` against the shared connection on a blocking worker thread.
    pub async fn with_conn<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServiceError> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        let expose = self.settings.debug;
        tokio::task::spawn_blocking(move || {
            let mut conn = db
                .lock()
                .map_err(|_| ApiError::internal("database connection lock poisoned", expose))?;
            f(&mut conn).map_err(ApiError::from)
        })
        .await
        .map_err(|err| ApiError::internal(format!("blocking task failed: {err}"), expose))?
    }
}

/// Builds the full application router.
pub fn build_router(state: SharedState) -> Router {
    let static_files = ServeDir::new(state.settings.frontend_dir.clone());
    Router::new()
        .merge(routes::system_routes())
        .merge(routes::note_routes())
        .merge(routes::action_item_routes())
        .nest_service("/static", static_files)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    info!(
        "event=http_request module=server method={} path={} http_status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}

/// Opens the store, then serves until the listener fails.
pub async fn run(settings: Settings) -> Result<()> {
    let database_path = settings.database_path.clone();
    let conn = tokio::task::spawn_blocking(move || open_db(&database_path))
        .await
        .context("database bootstrap task failed")?
        .with_context(|| {
            format!(
                "failed to initialize database at {}",
                settings.database_path.display()
            )
        })?;
    info!(
        "event=server_start module=server status=ok app={} version={} database={}",
        settings.app_name,
        settings.app_version,
        settings.database_path.display()
    );

    let llm = Arc::new(settings.ollama_backend());
    let addr = settings.bind_addr;
    let state = Arc::new(AppState::new(settings, conn, llm));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("event=server_listen module=server status=ok addr={}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
