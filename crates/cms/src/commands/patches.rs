//! Patches command - print the change list without touching the page.

use std::path::PathBuf;

use anyhow::Result;
use cms_core::FallbackPolicy;
use tracing::info;

use super::{GlobalArgs, block_on, load_config, loader, read_page};

pub struct PatchesArgs {
    pub page: PathBuf,
    pub data_dir: Option<PathBuf>,
    pub fallback: Option<FallbackPolicy>,
}

pub fn execute(global: &GlobalArgs, args: PatchesArgs) -> Result<()> {
    let config = load_config(global, args.data_dir, args.fallback)?;
    let document = read_page(&args.page)?;
    let loader = loader(config);

    let data = block_on(loader.fetch_all())?;
    let patches = loader.patches(&document, &data);
    info!(patches = patches.len(), page = %args.page.display(), "computed patches");

    println!("{}", serde_json::to_string_pretty(&patches)?);
    Ok(())
}
