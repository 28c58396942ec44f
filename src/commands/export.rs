//! Export command - dump the registry in storage format

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::core::paths::Workspace;
use crate::core::registry::Registry;

pub fn run(output: Option<PathBuf>) -> Result<()> {
    let workspace = Workspace::new();
    let registry = Registry::open(&workspace.registry);

    match output {
        Some(path) => {
            let mut file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            registry.export_to(&mut file)?;
            file.flush()?;
            println!(
                "{} Registry exported to {}",
                "✓".green(),
                path.display().to_string().cyan()
            );
        }
        None => {
            let stdout = io::stdout();
            registry.export_to(&mut stdout.lock())?;
        }
    }

    Ok(())
}
