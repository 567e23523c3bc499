//! `load_config` module: merges command-line arguments with environment secrets into an [`ImportConfig`].
//!
//! # Responsibilities
//! - Read the account handle and API key from the environment (`ADA_HANDLE`, `ADA_API_KEY`)
//! - Derive the API base URL from the handle, unless `ADA_BASE_URL` overrides it
//! - Map loosely-typed CLI values (milliseconds, seconds) to rich types
//!
//! # Errors
//! All errors in this module use `anyhow::Error` and name the offending variable,
//! so they read well at the CLI boundary.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tracing::{error, info};

use crate::client::ApiConfig;
use crate::import::{ImportConfig, UploadOptions};

pub const HANDLE_VAR: &str = "ADA_HANDLE";
pub const API_KEY_VAR: &str = "ADA_API_KEY";
pub const BASE_URL_VAR: &str = "ADA_BASE_URL";

/// Non-secret settings, usually taken from the command line.
#[derive(Debug, Clone)]
pub struct ImportArgs {
    pub archive: PathBuf,
    pub source_name: String,
    pub delay_ms: u64,
    pub timeout_secs: Option<u64>,
    pub show_progress: bool,
}

/// Builds the run configuration from `args` and the process environment.
pub fn load_config(args: &ImportArgs) -> Result<ImportConfig> {
    let api_key = match env::var(API_KEY_VAR) {
        Ok(key) => {
            info!("{API_KEY_VAR} found in env");
            key
        }
        Err(e) => {
            error!(error = ?e, "{API_KEY_VAR} environment variable not set");
            return Err(anyhow::anyhow!("{API_KEY_VAR} environment variable not set: {e}"));
        }
    };

    let base_url = match env::var(BASE_URL_VAR) {
        Ok(url) if !url.trim().is_empty() => {
            info!(base_url = %url, "Using API base URL override");
            url
        }
        _ => match env::var(HANDLE_VAR) {
            Ok(handle) => ApiConfig::base_url_for_handle(&handle),
            Err(e) => {
                error!(error = ?e, "{HANDLE_VAR} environment variable not set");
                return Err(anyhow::anyhow!("{HANDLE_VAR} environment variable not set: {e}"));
            }
        },
    };

    let config = ImportConfig {
        archive_path: args.archive.clone(),
        source_name: args.source_name.clone(),
        api: ApiConfig {
            base_url,
            api_key,
            request_timeout: args.timeout_secs.map(Duration::from_secs),
        },
        upload: UploadOptions {
            delay: Duration::from_millis(args.delay_ms),
            show_progress: args.show_progress,
        },
    };

    info!(
        archive = %config.archive_path.display(),
        source_name = %config.source_name,
        base_url = %config.api.base_url,
        delay_ms = args.delay_ms,
        "Config loaded and merged successfully"
    );
    Ok(config)
}
