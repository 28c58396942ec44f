mod commands;
mod core;
mod search;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recomatch")]
#[command(about = "Match course credit-recognition requests against prior decisions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search prior recognitions similar to a submitted course
    Search {
        /// Course the student presents (the one mandatory field)
        course: String,
        #[arg(long, help = "Origin program (partial text accepted)")]
        program: Option<String>,
        #[arg(long, help = "Origin institution (partial text accepted)")]
        institution: Option<String>,
        #[arg(long, help = "Academic year (exact filter, optional)")]
        year: Option<String>,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Register a new recognition decision
    Register {
        #[arg(long, help = "Program the student came from")]
        program: String,
        #[arg(long, help = "Origin institution")]
        institution: String,
        #[arg(long, help = "Academic year")]
        year: String,
        #[arg(long, help = "Course the student presented")]
        course: String,
        #[arg(long, help = "Course it was recognized as")]
        recognized: String,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Dump the registry in storage format
    Export {
        #[arg(long, help = "Write to file instead of stdout")]
        output: Option<PathBuf>,
    },
    /// Generate .recomatch.json config file
    Init {
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
    /// Show registry and matching configuration
    Status {
        #[arg(long, help = "JSON output")]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            course,
            program,
            institution,
            year,
            json,
        } => commands::search::run(&course, program, institution, year, json),
        Commands::Register {
            program,
            institution,
            year,
            course,
            recognized,
            json,
        } => commands::register::run(&program, &institution, &year, &course, &recognized, json),
        Commands::Export { output } => commands::export::run(output),
        Commands::Init { force } => commands::init::run(force),
        Commands::Status { json } => commands::status::run(json),
    }
}
