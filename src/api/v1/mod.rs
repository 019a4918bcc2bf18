//! Versioned API routes

pub mod ask;
pub mod collections;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/ask", post(ask::ask))
        .route("/collections", get(collections::list_collections))
}
