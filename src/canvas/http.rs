//! Canvas API client over HTTP.

use super::{CanvasError, CanvasResource, CanvasSource};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct HttpCanvasSource {
    client: Client,
    base_url: String,
}

impl HttpCanvasSource {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

/// Build `{base}/api/v1/courses/{course_id}/{resource}?access_token=...`.
///
/// `course_id` is percent-encoded as a single path segment.
pub fn resource_url(
    base_url: &str,
    resource: CanvasResource,
    course_id: &str,
    access_token: &str,
) -> Result<Url, CanvasError> {
    let mut url = Url::parse(base_url).map_err(|e| CanvasError::InvalidUrl(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| CanvasError::InvalidUrl(format!("{} cannot be a base URL", base_url)))?
        .pop_if_empty()
        .extend(["api", "v1", "courses", course_id])
        .extend(resource.path_segments());
    url.query_pairs_mut()
        .append_pair("access_token", access_token);
    Ok(url)
}

#[async_trait]
impl CanvasSource for HttpCanvasSource {
    async fn fetch(
        &self,
        resource: CanvasResource,
        course_id: &str,
        access_token: &str,
    ) -> Result<Value, CanvasError> {
        debug!("Fetching Canvas {} for course={}", resource, course_id);

        let url = resource_url(&self.base_url, resource, course_id, access_token)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CanvasError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "Canvas returned {} for {} of course={}",
                status, resource, course_id
            );
            return Err(CanvasError::Http {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| CanvasError::Parse(e.without_url().to_string()))
    }
}
