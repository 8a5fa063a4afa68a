//! GPU catalog HTTP API
//!
//! Serves the catalog read-only:
//! - `GET /api/gpus`: JSON array of `{id, manufacturer, name, tdp}`

use crate::core::{Gpu, Result};
use crate::db::Database;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handler state
#[derive(Clone)]
pub struct CatalogState {
    pub db: Arc<Mutex<Database>>,
}

impl CatalogState {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// List every GPU in the catalog
pub async fn list_gpus(
    State(state): State<CatalogState>,
) -> std::result::Result<Json<Vec<Gpu>>, (StatusCode, Json<ErrorResponse>)> {
    let db = state.db.lock().await;
    match db.list_gpus() {
        Ok(gpus) => Ok(Json(gpus)),
        Err(e) => {
            log::error!("Failed to list GPUs: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch GPU data".to_string(),
                }),
            ))
        }
    }
}

/// Build the API router
pub fn router(state: CatalogState) -> Router {
    Router::new()
        .route("/api/gpus", get(list_gpus))
        .with_state(state)
}

/// Serve the catalog until the process is stopped
pub async fn serve(address: SocketAddr, db: Database) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    log::info!("Catalog API listening on {}", listener.local_addr()?);

    axum::serve(listener, router(CatalogState::new(db))).await?;
    Ok(())
}
