//! Filtering parsed documents down to importable pages.

use serde_yaml::Value;

use crate::contract::{Article, KnowledgeSourceId};
use crate::error::ExtractError;
use crate::frontmatter::ParsedDocument;

/// Metadata key holding the content type.
pub const TYPE_KEY: &str = "type";
/// The only content type that gets imported.
pub const PAGE_TYPE: &str = "page";

/// A page ready to be attached to a knowledge source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDocument {
    pub slug: String,
    pub title: String,
    pub body: String,
}

impl PageDocument {
    pub fn into_article(self, source_id: &KnowledgeSourceId) -> Article {
        Article {
            id: self.slug,
            name: self.title,
            content: self.body,
            knowledge_source_id: source_id.clone(),
        }
    }
}

/// Keeps documents whose `type` is `page` and pulls out slug and title.
///
/// Anything that is not a page yields `Ok(None)`. A page without a usable
/// `slug` or `title` is an error.
pub fn normalize(doc: ParsedDocument) -> Result<Option<PageDocument>, ExtractError> {
    let is_page = matches!(doc.metadata.get(TYPE_KEY), Some(Value::String(t)) if t == PAGE_TYPE);
    if !is_page {
        return Ok(None);
    }

    let slug = required_field(&doc, "slug")?;
    let title = required_field(&doc, "title")?;

    Ok(Some(PageDocument {
        slug,
        title,
        body: doc.body,
    }))
}

fn required_field(doc: &ParsedDocument, key: &'static str) -> Result<String, ExtractError> {
    let value = match doc.metadata.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    };
    if value.trim().is_empty() {
        return Err(ExtractError::MissingField(key));
    }
    Ok(value)
}
