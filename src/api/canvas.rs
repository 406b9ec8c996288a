use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::api::AppState;
use crate::canvas::{CanvasError, CanvasResource};
use crate::error::AppError;

pub const MISSING_PARAMS_MESSAGE: &str = "Missing courseId or accessToken";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasQuery {
    pub course_id: Option<String>,
    pub access_token: Option<String>,
}

pub async fn get_assignments(
    State(state): State<AppState>,
    params: Result<Query<CanvasQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    proxy(&state, CanvasResource::Assignments, params).await
}

pub async fn get_quizzes(
    State(state): State<AppState>,
    params: Result<Query<CanvasQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    proxy(&state, CanvasResource::Quizzes, params).await
}

pub async fn get_grades(
    State(state): State<AppState>,
    params: Result<Query<CanvasQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    proxy(&state, CanvasResource::Grades, params).await
}

async fn proxy(
    state: &AppState,
    resource: CanvasResource,
    params: Result<Query<CanvasQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Ok(Query(params)) = params else {
        return Err(AppError::BadRequest(MISSING_PARAMS_MESSAGE.into()));
    };
    let (Some(course_id), Some(access_token)) = (
        non_empty(params.course_id),
        non_empty(params.access_token),
    ) else {
        return Err(AppError::BadRequest(MISSING_PARAMS_MESSAGE.into()));
    };

    match state.canvas.fetch(resource, &course_id, &access_token).await {
        Ok(body) => Ok(Json(body)),
        Err(CanvasError::Http { status, .. }) => Err(AppError::Upstream {
            status,
            message: format!("Error fetching {} from Canvas", resource),
        }),
        Err(e) => {
            warn!("Canvas {} request failed: {}", resource, e);
            Err(e.into())
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
