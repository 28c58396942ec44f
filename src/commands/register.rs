//! Register command - append one recognition decision to the registry

use anyhow::Result;
use colored::Colorize;

use crate::core::error::MatchError;
use crate::core::paths::Workspace;
use crate::core::record::Recognition;
use crate::core::registry::Registry;

pub fn run(
    program: &str,
    institution: &str,
    year: &str,
    course: &str,
    recognized: &str,
    json: bool,
) -> Result<()> {
    let workspace = Workspace::new();

    let record = match Recognition::new(program, year, institution, course, recognized) {
        Ok(record) => record,
        Err(MatchError::MissingRequiredField(field)) => {
            super::fail_missing_field(field, json);
        }
        Err(err) => return Err(err.into()),
    };

    let registry = Registry::open(&workspace.registry);
    let total = registry.append(&record)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "registered": true,
                "total": total,
                "registry": workspace.registry.display().to_string(),
            })
        );
    } else {
        println!(
            "{} Recognition registered: {} → {}",
            "✓".green(),
            record.source_course,
            record.recognized_course.cyan()
        );
        println!(
            "{} {} rows in {}",
            "→".dimmed(),
            total,
            workspace.registry.display()
        );
    }

    Ok(())
}
