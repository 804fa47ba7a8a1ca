//! Job submission handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::ProcessRequest;
use crate::dto::response::ProcessAccepted;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;
use crate::validation;

/// POST /process
///
/// Validates the body, checks the input URL is reachable, then schedules the
/// job in the background and answers 202 without waiting for it.
pub async fn submit_job(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ProcessRequest>,
) -> Result<(StatusCode, Json<ProcessAccepted>), ApiError> {
    tracing::info!(
        job_id = %req.job_id,
        user_id = %req.user_id,
        file_name = %req.metadata.file_name,
        "Received processing request"
    );

    validation::check_reachable(&state.transport, &req.input_file_url)
        .await
        .inspect_err(|e| {
            tracing::warn!(job_id = %req.job_id, "Rejected submission: {}", e.message);
        })?;
    validation::probe_output(&state.transport, &req.output_file_url).await;

    let response = ProcessAccepted::new(req.job_id.clone());
    // The handle is dropped: the job runs detached.
    let _ = state.runner.spawn(req.into_job());

    Ok((StatusCode::ACCEPTED, Json(response)))
}
