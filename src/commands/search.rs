//! Search command - match a submitted course against prior recognitions

use anyhow::Result;
use colored::Colorize;

use crate::core::error::MatchError;
use crate::core::paths::Workspace;
use crate::core::record::Query;
use crate::core::registry::Registry;
use crate::search::engine::{CorpusCache, FieldMatch, MatchEngine};

pub fn run(
    course: &str,
    program: Option<String>,
    institution: Option<String>,
    year: Option<String>,
    json: bool,
) -> Result<()> {
    let workspace = Workspace::new();
    let registry = Registry::open(&workspace.registry);
    let records = registry.load()?;

    let query = Query::new(
        program.as_deref().unwrap_or(""),
        institution.as_deref().unwrap_or(""),
        year.as_deref().unwrap_or(""),
        course,
    );

    let engine = MatchEngine::from_config(&workspace.config)?;
    let mut cache = CorpusCache::new();

    let report = match engine.search(&query, &records, &mut cache) {
        Ok(report) => report,
        Err(err) => {
            if let Some(MatchError::MissingRequiredField(field)) = err.downcast_ref::<MatchError>()
            {
                super::fail_missing_field(field, json);
            }
            return Err(err);
        }
    };

    if json {
        let json_matches: Vec<_> = report.matches.iter().map(match_to_json).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "query": {
                    "program": query.program,
                    "institution": query.institution,
                    "academic_year": query.academic_year,
                    "course": query.course,
                },
                "matches": json_matches,
                "recognized_ratio": report.recognized_ratio,
            }))?
        );
        return Ok(());
    }

    if report.matches.is_empty() {
        println!(
            "{} No sufficiently similar precedent found. Try adjusting the terms.",
            "!".yellow()
        );
        return Ok(());
    }

    println!(
        "{} {} similar cases found for: {}",
        "→".dimmed(),
        report.matches.len(),
        query.course.cyan()
    );
    println!();

    for (i, m) in report.matches.iter().enumerate() {
        println!(
            "{}. [{} {} {}] {}",
            (i + 1).to_string().bold(),
            score_cell("P", m.scores.program),
            score_cell("I", m.scores.institution),
            score_cell("C", m.scores.course),
            m.record.recognized_course.cyan()
        );
        println!(
            "   {} — {}, {} ({})",
            m.record.source_course.dimmed(),
            m.record.source_program,
            m.record.source_institution,
            m.record.academic_year
        );
        println!();
    }

    if let Some(ratio) = report.recognized_ratio {
        println!(
            "{} Distinct recognized courses across matches: {}",
            "→".dimmed(),
            format!("{:.1}%", ratio).bold()
        );
    }

    Ok(())
}

fn match_to_json(m: &FieldMatch) -> serde_json::Value {
    serde_json::json!({
        "source_program": m.record.source_program,
        "academic_year": m.record.academic_year,
        "source_institution": m.record.source_institution,
        "source_course": m.record.source_course,
        "recognized_course": m.record.recognized_course,
        "program_score": m.scores.program,
        "institution_score": m.scores.institution,
        "course_score": m.scores.course,
        "coincidences": m.coincidences,
    })
}

fn score_cell(label: &str, score: f32) -> String {
    let text = format!("{} {:.2}", label, score);
    let colored = if score > 0.8 {
        text.green()
    } else if score > 0.6 {
        text.yellow()
    } else {
        text.dimmed()
    };
    colored.to_string()
}
