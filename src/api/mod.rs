pub mod canvas;
pub mod health;
pub mod quiz_logs;
pub mod schedule;

use crate::canvas::CanvasSource;
use crate::db::Repository;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub canvas: Arc<dyn CanvasSource>,
}

impl AppState {
    pub fn new(repo: Arc<Repository>, canvas: Arc<dyn CanvasSource>) -> Self {
        Self { repo, canvas }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/quiz-logs",
            get(quiz_logs::list_quiz_logs).post(quiz_logs::create_quiz_log),
        )
        .route("/api/schedule", get(schedule::get_schedule))
        .route("/api/canvas/assignments", get(canvas::get_assignments))
        .route("/api/canvas/quizzes", get(canvas::get_quizzes))
        .route("/api/canvas/grades", get(canvas::get_grades))
        .layer(cors)
        .with_state(state)
}
