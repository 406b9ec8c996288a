//! Read-only access to the Canvas LMS REST API.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub mod http;
pub mod mock;

pub use http::HttpCanvasSource;
pub use mock::MockCanvasSource;

/// Course resources the service can proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanvasResource {
    Assignments,
    Quizzes,
    Grades,
}

impl CanvasResource {
    /// Path segments under `/api/v1/courses/{course_id}`.
    pub fn path_segments(self) -> &'static [&'static str] {
        match self {
            CanvasResource::Assignments => &["assignments"],
            CanvasResource::Quizzes => &["quizzes"],
            CanvasResource::Grades => &["students", "submissions"],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CanvasResource::Assignments => "assignments",
            CanvasResource::Quizzes => "quizzes",
            CanvasResource::Grades => "grades",
        }
    }
}

impl fmt::Display for CanvasResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Source of Canvas course data.
#[async_trait]
pub trait CanvasSource: Send + Sync + fmt::Debug {
    /// Fetch one resource listing for a course and return the JSON body as-is.
    async fn fetch(
        &self,
        resource: CanvasResource,
        course_id: &str,
        access_token: &str,
    ) -> Result<Value, CanvasError>;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CanvasError {
    /// Connection failure, DNS failure, timeout.
    #[error("Network error: {0}")]
    Network(String),
    /// Canvas answered with a non-success status.
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid Canvas URL: {0}")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_error_display() {
        let err = CanvasError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");

        let err = CanvasError::Http {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 401: Unauthorized");

        let err = CanvasError::Parse("expected value".to_string());
        assert_eq!(err.to_string(), "Parse error: expected value");
    }

    #[test]
    fn test_resource_labels() {
        assert_eq!(CanvasResource::Assignments.to_string(), "assignments");
        assert_eq!(CanvasResource::Quizzes.to_string(), "quizzes");
        assert_eq!(CanvasResource::Grades.to_string(), "grades");
    }

    #[test]
    fn test_grades_map_to_student_submissions() {
        assert_eq!(
            CanvasResource::Grades.path_segments(),
            &["students", "submissions"]
        );
    }
}
