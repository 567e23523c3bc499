//! Resetting the knowledge source an import writes into.

use tracing::info;

use crate::contract::{KnowledgeBase, KnowledgeSourceId};
use crate::error::ApiError;

/// Name of the knowledge source the documentation export is imported into.
pub const DEFAULT_SOURCE_NAME: &str = "opswat docs import";

/// Deletes every source named `name`, then creates a fresh one and returns its id.
///
/// Deletes run one at a time. Any failure is returned immediately; the client
/// has already logged it.
pub async fn reset_source<K>(kb: &K, name: &str) -> Result<KnowledgeSourceId, ApiError>
where
    K: KnowledgeBase + ?Sized,
{
    let sources = kb.list_sources().await?;

    for stale in sources.iter().filter(|s| s.name == name) {
        info!(source_id = %stale.id, source_name = name, "[SOURCE] Deleting existing source");
        kb.delete_source(&stale.id).await?;
    }

    let id = kb.create_source(name).await?;
    info!(source_id = %id, source_name = name, "[SOURCE] Source ready");
    Ok(id)
}
