//! Decode command - show how a content file is read.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub fn execute(file: PathBuf) -> Result<()> {
    let value = cms_yaml::decode_file(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let json = serde_json::to_string_pretty(&value)?;
    println!("{}", json);
    Ok(())
}
