//! `GET /v1/collections`

use axum::extract::State;
use tracing::warn;

use crate::api::state::AppState;
use crate::api::types::{CollectionsResponse, Json};

/// List backend collections; a backend failure yields an empty list
pub async fn list_collections(State(state): State<AppState>) -> Json<CollectionsResponse> {
    let collections = match state.backend.list_collections().await {
        Ok(collections) => collections,
        Err(e) => {
            warn!(
                backend = state.backend.backend_name(),
                error = %e,
                "Failed to list collections"
            );
            Vec::new()
        }
    };

    Json(CollectionsResponse::new(collections))
}
