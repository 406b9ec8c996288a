//! Mock Canvas source for testing without network calls.

use super::{CanvasError, CanvasResource, CanvasSource};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// A recorded call to [`MockCanvasSource::fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasRequest {
    pub resource: CanvasResource,
    pub course_id: String,
    pub access_token: String,
}

/// Mock Canvas source returning canned responses per resource.
///
/// Resources without a canned response yield an empty JSON array.
#[derive(Debug, Default)]
pub struct MockCanvasSource {
    responses: HashMap<CanvasResource, Result<Value, CanvasError>>,
    requests: Mutex<Vec<CanvasRequest>>,
}

impl MockCanvasSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, resource: CanvasResource, body: Value) -> Self {
        self.responses.insert(resource, Ok(body));
        self
    }

    pub fn with_error(mut self, resource: CanvasResource, error: CanvasError) -> Self {
        self.responses.insert(resource, Err(error));
        self
    }

    /// Calls received so far, oldest first.
    pub fn requests(&self) -> Vec<CanvasRequest> {
        self.requests
            .lock()
            .map(|reqs| reqs.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CanvasSource for MockCanvasSource {
    async fn fetch(
        &self,
        resource: CanvasResource,
        course_id: &str,
        access_token: &str,
    ) -> Result<Value, CanvasError> {
        if let Ok(mut reqs) = self.requests.lock() {
            reqs.push(CanvasRequest {
                resource,
                course_id: course_id.to_string(),
                access_token: access_token.to_string(),
            });
        }

        self.responses
            .get(&resource)
            .cloned()
            .unwrap_or_else(|| Ok(Value::Array(Vec::new())))
    }
}
