//! `POST /v1/ask`

use axum::extract::State;
use tracing::{debug, error};

use crate::api::state::AppState;
use crate::api::types::{ApiError, AskRequest, Json};
use crate::domain::{RagError, RagOutcome};

/// Run one session and return its outcome
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<RagOutcome>, ApiError> {
    debug!(
        question_len = request.question.len(),
        collections = ?request.collection_ids,
        "Ask request"
    );

    let collection_ids = request.collection_ids();

    match state.rag.run(request.question, collection_ids).await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(err) => {
            if !matches!(err, RagError::InvalidQuestion(_)) {
                error!(error = %err, "Session failed");
            }
            Err(err.into())
        }
    }
}
