//! Command implementations for the cms CLI
//!
//! Each command module handles the CLI interface and delegates to
//! cms-core for the actual work.

use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cms_core::{CmsConfig, DirectorySource, FallbackPolicy, Loader};
use cms_dom::Document;
use tracing::debug;

pub mod apply;
pub mod check;
pub mod decode;
pub mod patches;

/// Flags shared by every command.
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
}

/// Load the config, then let command-line flags override it.
pub fn load_config(
    global: &GlobalArgs,
    data_dir: Option<PathBuf>,
    fallback: Option<FallbackPolicy>,
) -> Result<CmsConfig> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let mut config = CmsConfig::discover(global.config.as_deref(), &cwd)?;
    if let Some(data_dir) = data_dir {
        config.data_dir = data_dir;
    }
    if let Some(fallback) = fallback {
        config.fallback = fallback;
    }
    debug!(
        data_dir = %config.data_dir.display(),
        fallback = %config.fallback,
        "resolved config"
    );
    Ok(config)
}

pub fn loader(config: CmsConfig) -> Loader<DirectorySource> {
    Loader::new(DirectorySource::from_config(&config), config)
}

pub fn read_page(path: &Path) -> Result<Document> {
    let html = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read page {}", path.display()))?;
    Ok(Document::parse_html(&html))
}

/// Run a future on a single-threaded runtime. The loader's fetches are
/// concurrent but never need more than one thread.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    Ok(runtime.block_on(future))
}
