//! Status command - registry and matching configuration summary

use anyhow::Result;
use colored::Colorize;

use crate::core::config::Strategy;
use crate::core::paths::Workspace;
use crate::core::registry::Registry;

pub fn run(json: bool) -> Result<()> {
    let workspace = Workspace::new();
    let registry = Registry::open(&workspace.registry);
    let records = registry.count()?;
    let matching = &workspace.config.matching;

    let model = match matching.strategy {
        Strategy::Embedding => Some(workspace.config.model.model_id.clone()),
        Strategy::Lexical => None,
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "registry": workspace.registry.display().to_string(),
                "records": records,
                "strategy": matching.strategy.as_str(),
                "threshold": matching.threshold(),
                "min_field_matches": matching.min_field_matches,
                "model": model,
            }))?
        );
        return Ok(());
    }

    println!("{}", "Recomatch status".bold());
    println!();
    println!(
        "  {} {} ({} records)",
        "Registry:".dimmed(),
        workspace.registry.display(),
        records
    );
    println!(
        "  {} {} (threshold {}, min {} of 3 fields)",
        "Strategy:".dimmed(),
        matching.strategy.as_str().cyan(),
        matching.threshold(),
        matching.min_field_matches
    );
    if let Some(model) = model {
        println!("  {} {}", "Model:".dimmed(), model);
    }

    Ok(())
}
