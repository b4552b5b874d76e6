//! Comment stripping: the first pipeline stage.
//!
//! POML borrows XML's `<!-- ... -->` comment syntax. Comments are removed
//! before any tag rule runs so that commented-out markup can never be
//! rewritten into the output. Matching is non-greedy — each opener pairs
//! with the nearest closer — and spans newlines.
//!
//! An opener with no closer is left in place. That mirrors the lenient
//! contract of the whole pipeline: malformed markup degrades to visible
//! text rather than to an error (strict mode catches it later if asked).

use once_cell::sync::Lazy;
use regex::Regex;

static RE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// Remove every `<!-- ... -->` span, including multi-line ones.
pub fn strip_comments(input: &str) -> String {
    RE_COMMENT.replace_all(input, "").to_string()
}

/// Number of comment spans `strip_comments` would remove.
pub(crate) fn comment_count(input: &str) -> usize {
    RE_COMMENT.find_iter(input).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_single_line_comment() {
        assert_eq!(strip_comments("a <!-- hidden --> b"), "a  b");
    }

    #[test]
    fn strips_multi_line_comment() {
        let input = "keep\n<!-- line one\nline two\n-->\nalso keep";
        assert_eq!(strip_comments(input), "keep\n\nalso keep");
    }

    #[test]
    fn non_greedy_stops_at_nearest_closer() {
        let input = "<!-- first -->middle<!-- second -->";
        assert_eq!(strip_comments(input), "middle");
    }

    #[test]
    fn comment_content_never_survives() {
        let input = "<!-- <task>secret</task> -->visible";
        let out = strip_comments(input);
        assert_eq!(out, "visible");
        assert!(!out.contains("secret"));
    }

    #[test]
    fn unterminated_comment_left_in_place() {
        let input = "before <!-- never closed";
        assert_eq!(strip_comments(input), input);
    }

    #[test]
    fn counts_spans() {
        assert_eq!(comment_count("<!-- a --> x <!-- b -->"), 2);
        assert_eq!(comment_count("no comments"), 0);
    }
}
