//! Output types: the converted text plus the numbers behind it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The result of converting one POML document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertOutput {
    /// The TOON text, trimmed lines joined with single newlines.
    pub toon: String,
    /// What the pipeline did to produce it.
    pub stats: ConvertStats,
}

/// Counters describing one conversion run.
///
/// Serialised as part of `--json` output so scripted callers can check
/// whether a document actually contained recognised markup (a document
/// with `tags_rewritten == 0` went through essentially untouched).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertStats {
    /// Byte length of the source document.
    pub input_bytes: usize,
    /// Physical lines in the source document.
    pub input_lines: usize,
    /// Non-empty lines in the TOON output.
    pub output_lines: usize,
    /// `<!-- ... -->` spans removed by the comment stripper.
    pub comments_stripped: usize,
    /// Opening tags consumed across all rewrite rules.
    pub tags_rewritten: usize,
    /// Wall-clock conversion time.
    pub duration_ms: u64,
}

/// A census of the markup in a document, without converting it.
///
/// Counts reflect the rewrite rules run in their fixed order: a tag
/// consumed by an earlier rule is not seen again by a later one, so e.g.
/// a `<role caption="X">` counts as `role`, never as `captioned`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkupSummary {
    /// Physical lines in the source document.
    pub lines: usize,
    /// `<!-- ... -->` comment spans.
    pub comments: usize,
    /// Opening-tag count per tag family; families with no matches are omitted.
    pub tags: BTreeMap<String, usize>,
}

impl MarkupSummary {
    /// Total opening tags across all families.
    pub fn total_tags(&self) -> usize {
        self.tags.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_totals_families() {
        let mut s = MarkupSummary::default();
        s.tags.insert("item".into(), 3);
        s.tags.insert("role".into(), 1);
        assert_eq!(s.total_tags(), 4);
    }

    #[test]
    fn stats_serialise_round_trip() {
        let stats = ConvertStats {
            input_bytes: 120,
            input_lines: 10,
            output_lines: 6,
            comments_stripped: 1,
            tags_rewritten: 5,
            duration_ms: 0,
        };
        let json = serde_json::to_string(&stats).unwrap();
        let back: ConvertStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back.output_lines, 6);
        assert_eq!(back.tags_rewritten, 5);
    }
}
