//! HTTP backend talking to `quillpost_server`.

use super::BlogBackend;
use crate::error::BackendError;
use quillpost_core::models::blog::{
    Blog, BlogStatus, BulkDeleteRequest, BulkDeleteResponse, PublishRequest, SaveDraftRequest,
    ViewsResponse,
};
use reqwest::{Client, Response, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Backend that forwards every call to a QuillPost server.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    /// Build a client for `base_url` (for example `http://localhost:38420`).
    ///
    /// # Errors
    /// Returns [`BackendError::InvalidUrl`] when the URL cannot carry a path,
    /// or [`BackendError::Http`] when the client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let base = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|err| BackendError::InvalidUrl(format!("{}: {}", base_url, err)))?;
        if base.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl(base_url.to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn error_message_for_response(status: StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return message.to_string();
        }
    }

    body.to_string()
}

async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => format!("failed to read error response body: {}", err),
    };
    Err(BackendError::Status {
        status: status.as_u16(),
        message: error_message_for_response(status, &body),
    })
}

/// Treat 404 as an absent row instead of an error.
async fn optional(response: Response) -> Result<Option<Response>, BackendError> {
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    ensure_success(response).await.map(Some)
}

impl BlogBackend for HttpBackend {
    async fn save_draft(&self, id: &str, draft: SaveDraftRequest) -> Result<Blog, BackendError> {
        let url = self.endpoint(&["api", "drafts", id])?;
        let response = self.client.put(url).json(&draft).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn publish_blog(&self, post: PublishRequest) -> Result<Blog, BackendError> {
        let url = self.endpoint(&["api", "blogs", "publish"])?;
        let response = self.client.post(url).json(&post).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn delete_draft(&self, id: &str) -> Result<bool, BackendError> {
        let url = self.endpoint(&["api", "drafts", id])?;
        let response = self.client.delete(url).send().await?;
        Ok(optional(response).await?.is_some())
    }

    async fn get_user_blogs(
        &self,
        author_id: &str,
        status: Option<BlogStatus>,
    ) -> Result<Vec<Blog>, BackendError> {
        let mut url = self.endpoint(&["api", "blogs"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("author_id", author_id);
            if let Some(status) = status {
                query.append_pair("status", status.as_str());
            }
        }
        let response = self.client.get(url).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn get_blog(&self, id: &str) -> Result<Option<Blog>, BackendError> {
        let url = self.endpoint(&["api", "blogs", id])?;
        let response = self.client.get(url).send().await?;
        match optional(response).await? {
            Some(response) => Ok(Some(response.json().await?)),
            None => Ok(None),
        }
    }

    async fn increment_views(&self, id: &str) -> Result<Option<u64>, BackendError> {
        let url = self.endpoint(&["api", "blogs", id, "views"])?;
        let response = self.client.post(url).send().await?;
        match optional(response).await? {
            Some(response) => {
                let body: ViewsResponse = response.json().await?;
                Ok(Some(body.views))
            }
            None => Ok(None),
        }
    }

    async fn bulk_delete_blogs(&self, ids: &[String]) -> Result<usize, BackendError> {
        let url = self.endpoint(&["api", "blogs", "bulk-delete"])?;
        let request = BulkDeleteRequest { ids: ids.to_vec() };
        let response = self.client.post(url).json(&request).send().await?;
        let body: BulkDeleteResponse = ensure_success(response).await?.json().await?;
        Ok(body.deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_json_error_field() {
        let message =
            error_message_for_response(StatusCode::BAD_REQUEST, r#"{"error":"title too long"}"#);
        assert_eq!(message, "title too long");
    }

    #[test]
    fn error_message_falls_back_to_reason_or_body() {
        assert_eq!(
            error_message_for_response(StatusCode::NOT_FOUND, "  "),
            "Not Found"
        );
        assert_eq!(
            error_message_for_response(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
    }

    #[test]
    fn endpoint_escapes_ids_and_keeps_base_path() {
        let backend =
            HttpBackend::new("http://localhost:38420/prefix/", DEFAULT_TIMEOUT).expect("backend");
        let url = backend
            .endpoint(&["api", "drafts", "odd/id"])
            .expect("endpoint");
        assert_eq!(
            url.as_str(),
            "http://localhost:38420/prefix/api/drafts/odd%2Fid"
        );
    }

    #[test]
    fn rejects_urls_without_a_path() {
        assert!(matches!(
            HttpBackend::new("mailto:someone@example.com", DEFAULT_TIMEOUT),
            Err(BackendError::InvalidUrl(_))
        ));
    }
}
