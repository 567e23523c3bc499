//! Front-matter extraction.
//!
//! Exported documentation files look like this:
//!
//! ```text
//! ---
//! type: page
//! slug: getting-started
//! title: Getting started
//! ---published
//! # Getting started
//! ...
//! ```
//!
//! The block opens with a `---` line and closes with `---published` or
//! `---draft`. Everything after the first closing terminator is the body.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;
use tracing::debug;

use crate::error::ExtractError;

static FRONT_MATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A---\r?\n([\s\S]*?)\r?\n---(published|draft)").expect("valid front matter regex")
});

/// Which terminator closed the front-matter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStatus {
    Published,
    Draft,
}

impl PublishStatus {
    fn from_marker(marker: &str) -> Self {
        match marker {
            "draft" => PublishStatus::Draft,
            _ => PublishStatus::Published,
        }
    }

    /// The closing delimiter line, e.g. `---published`.
    pub fn terminator(self) -> &'static str {
        match self {
            PublishStatus::Published => "---published",
            PublishStatus::Draft => "---draft",
        }
    }
}

/// A markdown file split into decoded metadata and body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub metadata: BTreeMap<String, Value>,
    pub status: PublishStatus,
    pub body: String,
}

/// Splits `raw` into front matter and body.
///
/// A leading byte-order mark is ignored. Returns `Ok(None)` when the text has
/// no front-matter block, and an error when the block exists but is not a
/// YAML mapping.
pub fn extract(raw: &str) -> Result<Option<ParsedDocument>, ExtractError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let Some(captures) = FRONT_MATTER_RE.captures(raw) else {
        return Ok(None);
    };
    let block = captures.get(1).map_or("", |m| m.as_str());
    let status = PublishStatus::from_marker(captures.get(2).map_or("", |m| m.as_str()));

    let metadata = decode_metadata(block)?;

    // Split once on the first terminator and keep the whole remainder, so a
    // body that repeats the terminator later is preserved verbatim.
    let body = raw
        .split_once(status.terminator())
        .map(|(_, rest)| rest.trim().to_string())
        .unwrap_or_default();

    debug!(?status, keys = metadata.len(), body_len = body.len(), "Extracted front matter");
    Ok(Some(ParsedDocument {
        metadata,
        status,
        body,
    }))
}

fn decode_metadata(block: &str) -> Result<BTreeMap<String, Value>, ExtractError> {
    match serde_yaml::from_str::<Value>(block)? {
        Value::Null => Ok(BTreeMap::new()),
        Value::Mapping(mapping) => mapping
            .into_iter()
            .map(|(key, value)| match key {
                Value::String(key) => Ok((key, value)),
                Value::Number(n) => Ok((n.to_string(), value)),
                Value::Bool(b) => Ok((b.to_string(), value)),
                _ => Err(ExtractError::NotAMapping),
            })
            .collect(),
        _ => Err(ExtractError::NotAMapping),
    }
}
