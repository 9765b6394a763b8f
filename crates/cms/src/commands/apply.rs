/*
 * apply.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Apply command implementation
 */

//! Apply command - load all content into a page and write it out.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use cms_core::FallbackPolicy;
use tracing::info;

use super::{GlobalArgs, block_on, load_config, loader, read_page};

pub struct ApplyArgs {
    pub page: PathBuf,
    pub data_dir: Option<PathBuf>,
    pub fallback: Option<FallbackPolicy>,
    /// `None` or `-` writes to stdout.
    pub output: Option<PathBuf>,
}

pub fn execute(global: &GlobalArgs, args: ApplyArgs) -> Result<()> {
    let config = load_config(global, args.data_dir, args.fallback)?;
    let mut document = read_page(&args.page)?;
    let loader = loader(config);

    let patches = block_on(loader.load(&mut document))??;
    let html = document.to_html();

    match args.output.filter(|path| path.as_os_str() != "-") {
        Some(path) => {
            std::fs::write(&path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(patches = patches.len(), output = %path.display(), "wrote page");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
