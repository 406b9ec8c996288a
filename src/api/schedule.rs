use axum::extract::State;
use axum::Json;
use tracing::error;

use crate::api::AppState;
use crate::domain::schedule::{self, ScheduleResponse};
use crate::error::AppError;

/// `GET /api/schedule`
///
/// A read failure or a non-numeric stored `timeSpent` is reported as 500.
pub async fn get_schedule(
    State(state): State<AppState>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let result = match state.repo.list_quiz_logs().await {
        Ok(logs) => schedule::estimate(&logs).map_err(AppError::from),
        Err(e) => Err(AppError::from(e)),
    };

    result.map(Json).map_err(|e| {
        error!("Failed to generate schedule: {}", e);
        e
    })
}
