//! CLI binary for poml2toon.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConvertConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use poml2toon::{convert_file, convert_file_to, inspect, ConvertConfig};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion (stdout)
  poml2toon prompt.poml

  # Convert to file
  poml2toon prompt.poml -o prompt.toon

  # Fail on markup outside the recognised vocabulary
  poml2toon --strict prompt.poml

  # Wider bullet indentation
  poml2toon --indent 4 prompt.poml

  # Structured JSON (text + stats)
  poml2toon --json prompt.poml > prompt.json

  # Census only, no conversion
  poml2toon --inspect-only prompt.poml

RECOGNISED MARKUP:
  Tag                         Output
  ─────────────────────────   ─────────────────────────────
  <role> / <task>             role: / task: label lines
  any tag with caption="X"    X: label line
  <list> + <item>             two-space indented - bullets
  <example>                   *** Example *** banner
  <HumanMessage>/<AiMessage>  User: / AI: dialogue labels
  <b> <i> <strong> <em>       removed, content kept
  <p> <poml>                  removed, content kept
  <!-- comments -->           removed entirely

  Anything else passes through untouched (or fails with --strict).

ENVIRONMENT VARIABLES:
  POML2TOON_OUTPUT   Default for -o/--output
  POML2TOON_INDENT   Default for --indent
  POML2TOON_BANNER   Default for --banner
  RUST_LOG           Tracing filter (overrides -v/-q)
"#;

/// Convert POML prompt markup to the terse TOON notation.
#[derive(Parser, Debug)]
#[command(
    name = "poml2toon",
    version,
    about = "Convert POML prompt markup to the terse TOON notation",
    long_about = "Convert a POML document (tag-delimited prompt markup) to TOON, a terse \
line-oriented notation with no tag syntax. The conversion is one-way and lossy by design: \
labels, bullets, and banners replace the markup, comments disappear, and every surviving \
line is trimmed.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the POML document.
    input: PathBuf,

    /// Write TOON to this file instead of stdout.
    #[arg(short, long, env = "POML2TOON_OUTPUT")]
    output: Option<PathBuf>,

    /// Leading spaces before each list bullet (0–8).
    #[arg(long, env = "POML2TOON_INDENT", default_value_t = 2,
          value_parser = clap::value_parser!(u8).range(0..=8))]
    indent: u8,

    /// Banner line emitted for <example> blocks.
    #[arg(long, env = "POML2TOON_BANNER", default_value = "*** Example ***")]
    banner: String,

    /// Label for <HumanMessage> dialogue turns.
    #[arg(long, env = "POML2TOON_USER_LABEL", default_value = "User")]
    user_label: String,

    /// Label for <AiMessage> dialogue turns.
    #[arg(long, env = "POML2TOON_AI_LABEL", default_value = "AI")]
    ai_label: String,

    /// Fail if unrecognised markup would survive into the output.
    #[arg(long, env = "POML2TOON_STRICT")]
    strict: bool,

    /// Output structured JSON (text + stats) instead of plain TOON.
    #[arg(long, env = "POML2TOON_JSON")]
    json: bool,

    /// Print a markup census only, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "POML2TOON_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the converted text.
    #[arg(short, long, env = "POML2TOON_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // stdout carries the converted document, so all logs go to stderr.
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let summary = inspect(&cli.input).context("Failed to inspect document")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
            );
        } else {
            println!("File:      {}", cli.input.display());
            println!("Lines:     {}", summary.lines);
            println!("Comments:  {}", summary.comments);
            println!("Tags:      {}", summary.total_tags());
            for (family, count) in &summary.tags {
                println!("  {family:<24} {count:>4}");
            }
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let config = build_config(&cli)?;

    // ── Run conversion ───────────────────────────────────────────────────
    if let Some(ref output_path) = cli.output {
        let stats =
            convert_file_to(&cli.input, output_path, &config).context("Conversion failed")?;

        if !cli.quiet {
            eprintln!(
                "{}  {} lines  {}ms  →  {}",
                green("✔"),
                stats.output_lines,
                stats.duration_ms,
                bold(&output_path.display().to_string()),
            );
            eprintln!(
                "   {} tags rewritten  /  {} comments stripped",
                dim(&stats.tags_rewritten.to_string()),
                dim(&stats.comments_stripped.to_string()),
            );
        }
    } else {
        let output = convert_file(&cli.input, &config).context("Conversion failed")?;

        if cli.json {
            let json =
                serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
            println!("{json}");
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(output.toon.as_bytes())
                .context("Failed to write to stdout")?;
            // Ensure a trailing newline on stdout.
            if !output.toon.ends_with('\n') {
                handle.write_all(b"\n").ok();
            }
        }

        if !cli.quiet && !cli.json {
            eprintln!(
                "   {} lines in  /  {} lines out  —  {}ms",
                dim(&output.stats.input_lines.to_string()),
                dim(&output.stats.output_lines.to_string()),
                output.stats.duration_ms,
            );
        }
    }

    Ok(())
}

/// Map CLI args to `ConvertConfig`.
fn build_config(cli: &Cli) -> Result<ConvertConfig> {
    ConvertConfig::builder()
        .bullet_indent(cli.indent as usize)
        .example_banner(&cli.banner)
        .user_label(&cli.user_label)
        .ai_label(&cli.ai_label)
        .strict(cli.strict)
        .build()
        .context("Invalid configuration")
}
