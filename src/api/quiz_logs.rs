use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::api::AppState;
use crate::domain::{NewQuizLog, QuizLogDto};
use crate::error::AppError;

pub const SAVED_MESSAGE: &str = "Quiz data saved successfully";

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// `POST /api/quiz-logs`
///
/// Any failure, including an unparseable body, is reported as 500 with the
/// raw error text.
pub async fn create_quiz_log(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    match save_quiz_log(&state, payload).await {
        Ok((id, log)) => {
            info!(
                id,
                quiz_id = ?log.quiz_id,
                time_spent = ?log.time_spent,
                "Saved quiz data"
            );
            Ok(Json(MessageResponse {
                message: SAVED_MESSAGE,
            }))
        }
        Err(e) => {
            error!("Error saving quiz data: {}", e);
            Err(e)
        }
    }
}

async fn save_quiz_log(
    state: &AppState,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(i64, NewQuizLog), AppError> {
    let Json(payload) = payload.map_err(|e| AppError::Internal(e.body_text()))?;
    let log = NewQuizLog::from_payload(&payload)?;
    let id = state.repo.insert_quiz_log(&log).await?;
    Ok((id, log))
}

/// `GET /api/quiz-logs`
pub async fn list_quiz_logs(
    State(state): State<AppState>,
) -> Result<Json<Vec<QuizLogDto>>, AppError> {
    let logs = state.repo.list_quiz_logs().await?;
    Ok(Json(logs.into_iter().map(QuizLogDto::from).collect()))
}
