#![allow(unused)]

//! # contract: interface to the remote knowledge base
//!
//! This module defines the [`KnowledgeBase`] trait and the plain data types
//! exchanged with it: knowledge sources (the named containers articles live
//! under) and articles.
//!
//! ## Interface & Extensibility
//! - [`crate::client::AdaClient`] implements the trait over HTTP.
//! - All methods are async and return [`ApiError`] on transport or status failures.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall`; `MockKnowledgeBase` is exported under
//!   the default `test-export-mocks` feature so integration tests can script
//!   responses without a live tenant.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use mockall::{automock, predicate::*};

use crate::error::ApiError;

/// Opaque identifier the remote service assigns to a knowledge source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeSourceId(pub String);

impl KnowledgeSourceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KnowledgeSourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KnowledgeSourceId {
    fn from(id: &str) -> Self {
        KnowledgeSourceId(id.to_owned())
    }
}

/// A knowledge source as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KnowledgeSource {
    pub id: KnowledgeSourceId,
    pub name: String,
}

/// One article as sent to the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    /// Unique article id, taken from the document slug.
    pub id: String,
    /// Display name, taken from the document title.
    pub name: String,
    /// Markdown body.
    pub content: String,
    /// The source created for this run.
    pub knowledge_source_id: KnowledgeSourceId,
}

/// Operations the importer needs from the knowledge-base service.
///
/// Implemented by [`crate::client::AdaClient`] and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// List every knowledge source on the account.
    async fn list_sources(&self) -> Result<Vec<KnowledgeSource>, ApiError>;

    /// Delete a knowledge source and everything under it.
    async fn delete_source(&self, id: &KnowledgeSourceId) -> Result<(), ApiError>;

    /// Create a knowledge source and return its new id.
    async fn create_source(&self, name: &str) -> Result<KnowledgeSourceId, ApiError>;

    /// Upload a single article. Returns the raw response body.
    async fn upload_article(&self, article: &Article) -> Result<serde_json::Value, ApiError>;
}
