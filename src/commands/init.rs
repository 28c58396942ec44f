//! Init command - generate the default config file

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;

use crate::core::config::{Config, CONFIG_FILE};
use crate::core::paths::data_root;

pub fn run(force: bool) -> Result<()> {
    let root = data_root();
    let path = root.join(CONFIG_FILE);

    if path.exists() && !force {
        println!(
            "{} Config already exists at {} (use --force to overwrite)",
            "!".yellow(),
            path.display()
        );
        return Ok(());
    }

    fs::write(&path, Config::default_json())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{} Wrote default config to {}",
        "✓".green(),
        path.display().to_string().cyan()
    );

    Ok(())
}
