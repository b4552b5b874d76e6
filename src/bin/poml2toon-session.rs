//! Session brief for the curriculum tooling.
//!
//! Loads (or creates) the student progress tracker and prints a short
//! orientation: overall progress, the module in flight, and a suggested
//! next step. Pure display glue over [`poml2toon::ProgressStore`].

use anyhow::{Context, Result};
use clap::Parser;
use poml2toon::{ModuleProgress, ProgressError, ProgressStore, SessionProgress};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

/// Load or create a student progress tracker and print a session brief.
#[derive(Parser, Debug)]
#[command(
    name = "poml2toon-session",
    version,
    about = "Load or create a student progress tracker and print a session brief"
)]
struct Cli {
    /// Path to the progress tracker JSON file.
    #[arg(
        long,
        env = "POML2TOON_TRACKER",
        default_value = "curriculum/PROGRESS_TRACKER.json"
    )]
    tracker: PathBuf,

    /// Student name, used when creating a fresh tracker.
    #[arg(long)]
    student: Option<String>,

    /// Start date (YYYY-MM-DD), used when creating a fresh tracker.
    #[arg(long)]
    start_date: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let store = ProgressStore::new(&cli.tracker);

    let progress = match store.load() {
        Ok(p) => p,
        Err(ProgressError::TrackerNotFound { .. }) => {
            let student = cli
                .student
                .as_deref()
                .context("No tracker found; pass --student <NAME> to create one")?;
            let start_date = cli
                .start_date
                .as_deref()
                .context("Pass --start-date <YYYY-MM-DD> when creating a tracker")?;
            eprintln!("{} No progress tracker found, creating a new one.", cyan("◆"));
            let p = store
                .create(student, start_date)
                .context("Failed to create progress tracker")?;
            eprintln!(
                "{} Created progress tracker at {}",
                green("✔"),
                bold(&store.path().display().to_string())
            );
            p
        }
        Err(e) => return Err(e).context("Failed to load progress tracker"),
    };

    print_brief(&progress);
    Ok(())
}

fn print_brief(progress: &SessionProgress) {
    let rule = "═".repeat(60);

    println!("{rule}");
    println!("{}", bold(&format!("Welcome back, {}!", progress.student_name)));
    println!("{rule}");
    println!();
    println!(
        "Progress: {}/{} modules completed  {}",
        bold(&progress.completed_count().to_string()),
        progress.total_count(),
        dim(&format!("(since {})", progress.start_date)),
    );
    println!();

    if let Some((id, module)) = progress.current_module() {
        println!("{} Currently working on: {}", cyan("▸"), module_line(id, module));
        println!("   Lessons completed: {}", module.lessons_completed.len());
        if !module.notes.is_empty() {
            println!("   Notes: {}", module.notes);
        }
    } else if let Some((id, module)) = progress.next_module() {
        println!("{} Next up: {}", cyan("▸"), module_line(id, module));
    } else if progress.total_count() > 0 {
        println!(
            "{} All modules completed. Time for the capstone project.",
            green("✔")
        );
    } else {
        println!("{} Tracker is empty; add modules to get started.", dim("·"));
    }

    println!();
    println!("{}", dim("Suggested next steps:"));
    match (progress.current_module(), progress.next_module()) {
        (Some((id, module)), _) => {
            println!("  1. Continue {}", module_line(id, module));
            println!("  2. Convert its prompt: poml2toon curriculum/{id}/prompt.poml");
        }
        (None, Some((id, module))) => {
            println!("  1. Start {}", module_line(id, module));
            println!("  2. Convert its prompt: poml2toon curriculum/{id}/prompt.poml");
        }
        (None, None) => {
            println!("  1. Review your portfolio output directory.");
        }
    }
    println!();
}

fn module_line(id: &str, module: &ModuleProgress) -> String {
    format!("{} {}", bold(id), module.name)
}
