//! Command-line entrypoint for `docs-import`.
//!
//! Every flag has a default, so running the binary with no arguments imports
//! `./Docs.zip` into the `opswat docs import` knowledge source.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::client::AdaClient;
use crate::import::{run_import, DEFAULT_UPLOAD_DELAY};
use crate::load_config::{load_config, ImportArgs};
use crate::source::DEFAULT_SOURCE_NAME;

/// Import a zipped markdown documentation export into an Ada knowledge base.
#[derive(Parser, Debug)]
#[clap(name = "docs-import", version)]
pub struct Cli {
    /// Path to the zipped documentation export
    #[clap(long, default_value = "./Docs.zip")]
    pub archive: PathBuf,

    /// Knowledge source to replace with the imported articles
    #[clap(long, default_value = DEFAULT_SOURCE_NAME)]
    pub source_name: String,

    /// Pause after each article upload, in milliseconds
    #[clap(long, default_value_t = DEFAULT_UPLOAD_DELAY.as_millis() as u64)]
    pub delay_ms: u64,

    /// Per-request timeout in seconds (no timeout when omitted)
    #[clap(long)]
    pub timeout_secs: Option<u64>,

    /// Do not draw a progress bar
    #[clap(long)]
    pub no_progress: bool,
}

impl Cli {
    fn import_args(&self) -> ImportArgs {
        ImportArgs {
            archive: self.archive.clone(),
            source_name: self.source_name.clone(),
            delay_ms: self.delay_ms,
            timeout_secs: self.timeout_secs,
            show_progress: !self.no_progress,
        }
    }
}

/// Async CLI logic, shared by `main` and integration tests.
pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli.import_args())?;
    let client = AdaClient::new(&config.api)?;

    let report = run_import(&config, &client).await?;

    println!(
        "Operation completed. Source {}: {} of {} articles uploaded, {} failed.",
        report.source_id,
        report.uploaded.len(),
        report.extracted,
        report.failed.len()
    );
    Ok(())
}
