//! Check command - report the state of the content directory.

use std::path::PathBuf;

use anyhow::Result;

use super::{GlobalArgs, block_on, load_config, loader};

pub struct CheckArgs {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
}

pub fn execute(global: &GlobalArgs, args: CheckArgs) -> Result<()> {
    let config = load_config(global, args.data_dir, None)?;
    let data_dir = config.data_dir.clone();
    let report = block_on(loader(config).check())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Content directory: {}", data_dir.display());
    for status in &report {
        let state = match (status.found, status.valid) {
            (false, _) => "missing",
            (true, false) => "incomplete",
            (true, true) => "ok",
        };
        println!("  {:<14} {:<18} {}", status.section.name(), status.file, state);
    }
    Ok(())
}
