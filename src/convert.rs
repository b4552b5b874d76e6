//! Conversion entry points.
//!
//! ## Why one buffer, three stages?
//!
//! The whole document fits in memory, so every stage is a pure
//! `&str → String` pass over one owned buffer: strip comments, rewrite
//! tags rule by rule, normalize lines. No stage needs information from a
//! later stage, and no state outlives the call. [`convert_document`] is the
//! in-memory core; the `*_file` variants add path resolution and atomic
//! output on top.

use crate::config::ConvertConfig;
use crate::error::ConvertError;
use crate::output::{ConvertOutput, ConvertStats, MarkupSummary};
use crate::pipeline::{comments, input, normalize, rewrite};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Convert an in-memory POML document to TOON.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// Fails only for configuration-level reasons: with `strict` set, leftover
/// markup after the rewrite pass returns
/// [`ConvertError::MalformedMarkup`]. The default lenient mode always
/// succeeds, passing unrecognised markup through as text.
pub fn convert_document(
    source: &str,
    config: &ConvertConfig,
) -> Result<ConvertOutput, ConvertError> {
    let start = Instant::now();

    // ── Stage 1: strip comments ──────────────────────────────────────────
    let comments_stripped = comments::comment_count(source);
    let mut text = comments::strip_comments(source);

    // ── Stage 2: rewrite tags, rule by rule, in table order ──────────────
    let mut tags_rewritten = 0usize;
    for rule in rewrite::rule_set(config) {
        let (next, consumed) = rule.apply(&text);
        if consumed > 0 {
            debug!("rule '{}' consumed {} opening tags", rule.family, consumed);
        }
        text = next;
        tags_rewritten += consumed;
    }

    // Strict mode: anything still tag-shaped is a hard failure.
    if config.strict {
        if let Some(span) = rewrite::leftover_markup(&text) {
            return Err(ConvertError::MalformedMarkup {
                detail: format!("unconverted markup remains: '{span}'"),
            });
        }
    }

    // ── Stage 3: normalize lines ─────────────────────────────────────────
    let toon = normalize::normalize_lines(&text, config.bullet_indent);

    let stats = ConvertStats {
        input_bytes: source.len(),
        input_lines: source.lines().count(),
        output_lines: toon.lines().count(),
        comments_stripped,
        tags_rewritten,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    Ok(ConvertOutput { toon, stats })
}

/// Read the POML document at `path` and convert it.
pub fn convert_file(
    path: impl AsRef<Path>,
    config: &ConvertConfig,
) -> Result<ConvertOutput, ConvertError> {
    let path = path.as_ref();
    info!("Starting conversion: {}", path.display());
    let source = input::read_document(path)?;
    let output = convert_document(&source, config)?;
    info!(
        "Converted {} input lines to {} output lines in {}ms",
        output.stats.input_lines, output.stats.output_lines, output.stats.duration_ms
    );
    Ok(output)
}

/// Convert a POML file and write the TOON output to another file.
///
/// Uses atomic write (temp file + rename) to prevent partial files, and
/// creates missing parent directories.
pub fn convert_file_to(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConvertConfig,
) -> Result<ConvertStats, ConvertError> {
    let output = convert_file(input_path, config)?;
    let path = output_path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ConvertError::OutputWriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
    }

    let tmp_path = path.with_extension("toon.tmp");
    std::fs::write(&tmp_path, format!("{}\n", output.toon)).map_err(|e| {
        ConvertError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    std::fs::rename(&tmp_path, path).map_err(|e| ConvertError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(output.stats)
}

/// Census the markup at `path` without converting it.
///
/// Does not run the normalizer and needs no configuration; handy for a
/// quick look at what a document contains before converting it.
pub fn inspect(path: impl AsRef<Path>) -> Result<MarkupSummary, ConvertError> {
    let source = input::read_document(path.as_ref())?;
    Ok(census(&source))
}

/// Census an in-memory document: per-family opening-tag counts, comment
/// spans, and line count.
pub fn census(source: &str) -> MarkupSummary {
    let mut summary = MarkupSummary {
        lines: source.lines().count(),
        comments: comments::comment_count(source),
        tags: BTreeMap::new(),
    };

    // Counts come from running the rules in order over a scratch buffer, so
    // overlap resolution matches what a real conversion would do.
    let mut text = comments::strip_comments(source);
    for rule in rewrite::rule_set(&ConvertConfig::default()) {
        let (next, consumed) = rule.apply(&text);
        if consumed > 0 {
            summary.tags.insert(rule.family.to_string(), consumed);
        }
        text = next;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ConvertConfig {
        ConvertConfig::default()
    }

    #[test]
    fn tag_free_input_is_identity_modulo_whitespace() {
        let source = "  first line  \n\nsecond line\n   \nthird\n";
        let output = convert_document(source, &cfg()).unwrap();
        assert_eq!(output.toon, "first line\nsecond line\nthird");
        assert_eq!(output.stats.tags_rewritten, 0);
    }

    #[test]
    fn caption_becomes_exact_label_line() {
        let source = "<cp caption=\"Output Format\">\nKeep it short.\n</cp>\n";
        let output = convert_document(source, &cfg()).unwrap();
        let lines: Vec<&str> = output.toon.lines().collect();
        assert_eq!(lines[0], "Output Format:");
        assert_eq!(lines[1], "Keep it short.");
    }

    #[test]
    fn list_items_one_line_each_in_order() {
        let source = "<list><item>Alpha</item><item>Beta</item></list>";
        let output = convert_document(source, &cfg()).unwrap();
        assert_eq!(output.toon, "  - Alpha\n  - Beta");
    }

    #[test]
    fn comments_never_reach_the_output() {
        let source = "visible\n<!-- one line -->\n<!-- spanning\nmany\nlines -->\nalso visible\n";
        let output = convert_document(source, &cfg()).unwrap();
        assert_eq!(output.toon, "visible\nalso visible");
        assert_eq!(output.stats.comments_stripped, 2);
    }

    #[test]
    fn structural_rule_wins_over_caption_on_the_same_tag() {
        // Order-dependent on purpose: the role rule runs first and consumes
        // the whole opening tag, so the caption value is discarded. This
        // pins the actual behaviour of the rule table, inline form included.
        let output =
            convert_document("<role caption=\"Helper\"><task>Do X</task></role>", &cfg()).unwrap();
        assert_eq!(output.toon, "role:task:Do X");

        let spaced = convert_document(
            "<role caption=\"Helper\">\n<task>\nDo X\n</task>\n</role>\n",
            &cfg(),
        )
        .unwrap();
        assert_eq!(spaced.toon, "role:\ntask:\nDo X");
        assert!(!spaced.toon.contains("Helper"));
    }

    #[test]
    fn full_document_flattens_in_order() {
        let source = "<poml>\n<role>\nYou are a tutor.\n</role>\n\
<stepwise-instructions caption=\"Steps\">\n<list>\n<item>Read</item>\n<item>Answer</item>\n</list>\n</stepwise-instructions>\n\
<example>\n<HumanMessage>Hi</HumanMessage>\n<AiMessage>Hello</AiMessage>\n</example>\n</poml>\n";
        let output = convert_document(source, &cfg()).unwrap();
        assert_eq!(
            output.toon,
            "role:\nYou are a tutor.\nSteps:\n  - Read\n  - Answer\n*** Example ***\nUser:Hi\nAI:Hello"
        );
    }

    #[test]
    fn lenient_mode_passes_unknown_markup_through() {
        let output = convert_document("<mystery>kept</mystery>", &cfg()).unwrap();
        assert_eq!(output.toon, "<mystery>kept</mystery>");
    }

    #[test]
    fn strict_mode_rejects_unknown_markup() {
        let config = ConvertConfig::builder().strict(true).build().unwrap();
        let result = convert_document("<mystery>kept</mystery>", &config);
        assert!(matches!(result, Err(ConvertError::MalformedMarkup { .. })));
    }

    #[test]
    fn strict_mode_rejects_unterminated_comment() {
        let config = ConvertConfig::builder().strict(true).build().unwrap();
        let result = convert_document("fine so far <!-- oops", &config);
        assert!(matches!(result, Err(ConvertError::MalformedMarkup { .. })));
    }

    #[test]
    fn strict_mode_accepts_well_formed_input() {
        let config = ConvertConfig::builder().strict(true).build().unwrap();
        let output = convert_document("<task>\nAll clean.\n</task>\n", &config).unwrap();
        assert_eq!(output.toon, "task:\nAll clean.");
    }

    #[test]
    fn stats_count_what_happened() {
        let source = "<!-- c -->\n<task>\nwork\n</task>\n<list><item>a</item></list>\n";
        let output = convert_document(source, &cfg()).unwrap();
        assert_eq!(output.stats.comments_stripped, 1);
        // task + list + item
        assert_eq!(output.stats.tags_rewritten, 3);
        assert_eq!(output.stats.output_lines, output.toon.lines().count());
        assert_eq!(output.stats.input_bytes, source.len());
    }

    #[test]
    fn census_counts_families_in_rule_order() {
        let source =
            "<!-- x -->\n<role>\nr\n</role>\n<cp caption=\"C\">\nc\n</cp>\n<list><item>i</item></list>\n";
        let summary = census(source);
        assert_eq!(summary.comments, 1);
        assert_eq!(summary.tags.get("role"), Some(&1));
        assert_eq!(summary.tags.get("captioned"), Some(&1));
        assert_eq!(summary.tags.get("list"), Some(&1));
        assert_eq!(summary.tags.get("item"), Some(&1));
        assert_eq!(summary.tags.get("task"), None);
        assert_eq!(summary.total_tags(), 4);
    }

    #[test]
    fn census_respects_overlap_precedence() {
        let summary = census("<role caption=\"Helper\">x</role>");
        assert_eq!(summary.tags.get("role"), Some(&1));
        assert_eq!(summary.tags.get("captioned"), None);
    }
}
