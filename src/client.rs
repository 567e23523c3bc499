#![doc = "HTTP implementation of the knowledge-base contract against the Ada knowledge API."]
//
//! # Ada client
//!
//! [`AdaClient`] wires the [`KnowledgeBase`] trait to the Ada knowledge REST API
//! (`/sources` and `/articles`). Every request carries the bearer token and a
//! JSON content type. Non-2xx responses become [`ApiError::Status`] with the
//! response body attached for diagnostics.
//!
//! Construct it from an [`ApiConfig`], normally produced by
//! [`crate::load_config::load_config`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use crate::contract::{Article, KnowledgeBase, KnowledgeSource, KnowledgeSourceId};
use crate::error::ApiError;

/// Connection settings for the knowledge API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API root, without a trailing slash.
    pub base_url: String,
    pub api_key: String,
    /// Per-request timeout. `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
}

impl ApiConfig {
    /// Base URL of the knowledge API for an account handle.
    pub fn base_url_for_handle(handle: &str) -> String {
        format!("https://{handle}.ada.support/api/knowledge/v1")
    }
}

#[derive(Deserialize)]
struct SourceList {
    #[serde(default)]
    data: Option<Vec<KnowledgeSource>>,
}

#[derive(Serialize)]
struct NewSource<'a> {
    name: &'a str,
}

#[derive(Deserialize)]
struct CreatedSource {
    data: CreatedSourceData,
}

#[derive(Deserialize)]
struct CreatedSourceData {
    id: KnowledgeSourceId,
}

#[derive(Serialize)]
struct ArticleBatch<'a> {
    articles: [&'a Article; 1],
}

pub struct AdaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AdaClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            tracing::error!(error = ?e, "Failed to build HTTP client");
            ApiError::Client(e.to_string())
        })?;

        tracing::info!(
            base_url = %config.base_url,
            api_key_set = !config.api_key.is_empty(),
            timeout = ?config.request_timeout,
            "Initialized AdaClient"
        );
        Ok(AdaClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.bearer_auth(&self.api_key).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl KnowledgeBase for AdaClient {
    async fn list_sources(&self) -> Result<Vec<KnowledgeSource>, ApiError> {
        tracing::info!("Listing knowledge sources");
        let result = async {
            let response = self.send(self.http.get(self.url("/sources"))).await?;
            let list: SourceList = response
                .json()
                .await
                .map_err(|e| ApiError::Decode(format!("source list: {e}")))?;
            // `data` may be absent or null.
            Ok::<_, ApiError>(list.data.unwrap_or_default())
        }
        .await;

        match &result {
            Ok(sources) => tracing::info!(count = sources.len(), "Fetched knowledge sources"),
            Err(e) => tracing::error!(error = %e, "Failed to list knowledge sources"),
        }
        result
    }

    async fn delete_source(&self, id: &KnowledgeSourceId) -> Result<(), ApiError> {
        tracing::info!(source_id = %id, "Deleting knowledge source");
        let url = self.url(&format!("/sources/{id}"));
        match self.send(self.http.delete(url)).await {
            Ok(_) => {
                tracing::info!(source_id = %id, "Deleted knowledge source");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, source_id = %id, "Failed to delete knowledge source");
                Err(e)
            }
        }
    }

    async fn create_source(&self, name: &str) -> Result<KnowledgeSourceId, ApiError> {
        tracing::info!(source_name = name, "Creating knowledge source");
        let result = async {
            let request = self.http.post(self.url("/sources")).json(&NewSource { name });
            let response = self.send(request).await?;
            let created: CreatedSource = response
                .json()
                .await
                .map_err(|e| ApiError::Decode(format!("created source: {e}")))?;
            Ok::<_, ApiError>(created.data.id)
        }
        .await;

        match &result {
            Ok(id) => tracing::info!(source_id = %id, "Created knowledge source"),
            Err(e) => tracing::error!(error = %e, source_name = name, "Failed to create knowledge source"),
        }
        result
    }

    // Errors are not logged here; the upload loop logs them with the article id.
    async fn upload_article(&self, article: &Article) -> Result<serde_json::Value, ApiError> {
        tracing::debug!(
            article_id = %article.id,
            source_id = %article.knowledge_source_id,
            content_len = article.content.len(),
            "Uploading article"
        );
        let batch = ArticleBatch {
            articles: [article],
        };
        let request = self.http.post(self.url("/articles")).json(&batch);
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        // A 2xx is an accepted upload whatever the body looks like.
        Ok(serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())))
    }
}
