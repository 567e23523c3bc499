//! High-level pipeline: archive → page documents → fresh knowledge source → articles.
//!
//! A run moves through four phases:
//!   - **extract**: read every `.md` entry of the archive, parse its front matter
//!     and keep the pages. Broken files are logged and skipped.
//!   - **create source**: reset the target knowledge source. Failure aborts the run.
//!   - **upload**: send each page as one article, in archive order, with a fixed
//!     delay between requests. A failed upload is logged and the loop moves on.
//!   - **done**: the progress bar is finished and an [`ImportReport`] returned.
//!
//! # Navigation
//! - Main entrypoint: [`run_import`]
//! - Pure extraction step: [`extract_documents`]
//! - Upload loop on its own: [`upload_documents`]

use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info};

use crate::archive::{read_markdown_entries, RawEntry};
use crate::client::ApiConfig;
use crate::contract::{Article, KnowledgeBase, KnowledgeSourceId};
use crate::document::{normalize, PageDocument};
use crate::error::{ExtractError, ImportError, UploadError};
use crate::frontmatter::extract;
use crate::source::reset_source;

/// Pause between two uploads.
pub const DEFAULT_UPLOAD_DELAY: Duration = Duration::from_millis(50);

/// Everything a run needs.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub archive_path: PathBuf,
    pub source_name: String,
    pub api: ApiConfig,
    pub upload: UploadOptions,
}

/// Settings for the upload loop.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Delay inserted after every upload, successful or not.
    pub delay: Duration,
    /// Draw a progress bar on the terminal.
    pub show_progress: bool,
}

#[derive(Debug)]
pub struct ImportReport {
    pub source_id: KnowledgeSourceId,
    /// Number of page documents extracted from the archive.
    pub extracted: usize,
    /// Ids of the articles the API accepted.
    pub uploaded: Vec<String>,
    pub failed: Vec<UploadError>,
    /// Final progress bar position; one tick per attempted article.
    pub progressed: u64,
}

/// Parses and filters archive entries, keeping archive order.
pub fn extract_documents(entries: &[RawEntry]) -> Vec<PageDocument> {
    let mut documents = Vec::new();
    for entry in entries {
        match extract_page(entry) {
            Ok(Some(page)) => {
                debug!(file = %entry.name, slug = %page.slug, "[IMPORT] Extracted page");
                documents.push(page);
            }
            Ok(None) => {}
            Err(e) => {
                error!(file = %entry.name, error = %e, "[IMPORT] Error processing file");
            }
        }
    }
    documents
}

fn extract_page(entry: &RawEntry) -> Result<Option<PageDocument>, ExtractError> {
    match extract(&entry.text())? {
        Some(doc) => normalize(doc),
        None => Ok(None),
    }
}

/// Uploads one article, attaching its id to any failure.
pub async fn upload_article<K>(kb: &K, article: &Article) -> Result<serde_json::Value, UploadError>
where
    K: KnowledgeBase + ?Sized,
{
    kb.upload_article(article).await.map_err(|source| UploadError {
        article_id: article.id.clone(),
        source,
    })
}

/// Uploads `documents` into `source_id` one at a time.
///
/// Every document is attempted exactly once; failures end up in the report.
pub async fn upload_documents<K>(
    kb: &K,
    source_id: &KnowledgeSourceId,
    documents: Vec<PageDocument>,
    options: &UploadOptions,
) -> ImportReport
where
    K: KnowledgeBase + ?Sized,
{
    let extracted = documents.len();
    let progress = progress_bar(extracted as u64, options.show_progress);
    let mut uploaded = Vec::new();
    let mut failed = Vec::new();

    for document in documents {
        let article = document.into_article(source_id);
        match upload_article(kb, &article).await {
            Ok(_) => {
                progress.suspend(|| info!(article_id = %article.id, "[UPLOAD] Uploaded article"));
                uploaded.push(article.id);
            }
            Err(e) => {
                progress.suspend(|| {
                    error!(article_id = %e.article_id, error = %e.source, "[UPLOAD] Error uploading article")
                });
                failed.push(e);
            }
        }
        progress.inc(1);
        tokio::time::sleep(options.delay).await;
    }

    progress.finish();
    ImportReport {
        source_id: source_id.clone(),
        extracted,
        uploaded,
        failed,
        progressed: progress.position(),
    }
}

/// Runs a full import against `kb`.
///
/// Returns an error only when the archive cannot be read or the knowledge
/// source cannot be reset; upload failures are reported, not raised. Setup
/// errors are logged where they happen and returned as-is.
pub async fn run_import<K>(config: &ImportConfig, kb: &K) -> Result<ImportReport, ImportError>
where
    K: KnowledgeBase + ?Sized,
{
    info!(archive = %config.archive_path.display(), "[IMPORT] Starting import");

    let entries = read_markdown_entries(&config.archive_path)?;
    let documents = extract_documents(&entries);
    info!(documents = documents.len(), "[IMPORT] Processed documents");

    let source_id = reset_source(kb, &config.source_name)
        .await
        .map_err(ImportError::Source)?;
    info!(source_id = %source_id, "[IMPORT] Knowledge source reset");

    let report = upload_documents(kb, &source_id, documents, &config.upload).await;
    info!(
        source_id = %report.source_id,
        uploaded = report.uploaded.len(),
        failed = report.failed.len(),
        "[IMPORT] Import finished"
    );
    Ok(report)
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "{bar:40.cyan/blue} {percent}% | ETA: {eta} | {pos}/{len}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("█░");
    bar.set_style(style);
    bar
}
