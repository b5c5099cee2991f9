use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::model::{
    SubmissionOutcome, SubmitError, SubmitTaskRequest, SubmitTaskResponse, TaskSubmission,
};
use crate::AppState;
use crate::utils::{error_codes, error_to_api_response, success_to_api_response};

#[axum::debug_handler]
pub async fn submit_task(
    State(state): State<AppState>,
    Json(req): Json<SubmitTaskRequest>,
) -> impl IntoResponse {
    let user_id = req.user_id.trim();

    if user_id.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            error_to_api_response(error_codes::VALIDATION_ERROR, "User ID is required".into()),
        );
    }

    match TaskSubmission::submit(&state, user_id).await {
        Ok(SubmissionOutcome::Completed) => (
            StatusCode::OK,
            success_to_api_response(SubmitTaskResponse {
                status: "completed".into(),
            }),
        ),
        Ok(SubmissionOutcome::Deferred) => (
            StatusCode::TOO_MANY_REQUESTS,
            error_to_api_response(
                error_codes::RATE_LIMIT,
                "Rate limit exceeded. Task queued.".into(),
            ),
        ),
        Err(SubmitError::Store(e)) => {
            tracing::error!("Task store unavailable for user {}: {}", user_id, e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                error_to_api_response(
                    error_codes::SERVICE_UNAVAILABLE,
                    "Task store is unavailable".into(),
                ),
            )
        }
        Err(SubmitError::Completion(e)) => {
            tracing::error!("Failed to complete task for user {}: {}", user_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "Failed to complete task".into()),
            )
        }
    }
}
