//! Tag rewriting: the ordered rule table at the heart of the transducer.
//!
//! Each recognised tag family gets exactly one [`TagRule`]: a compiled
//! opening-tag pattern, a replacement policy for the opening tag, and a
//! list of closing-tag literals removed with no replacement. The rules are
//! pure `&str → String` transforms applied in a fixed order, and the order
//! IS the contract:
//!
//! - caption extraction must run before the generic inline rule strips
//!   attribute-bearing tags, or the caption text would be gone;
//! - a tag matched by more than one pattern goes to the first rule in the
//!   table (`<role caption="X">` is consumed by the `role` rule, caption
//!   and all).
//!
//! The patterns are deliberately loose, single-pass substitutions over the
//! whole buffer — not a parser. Nesting depth, unmatched closers, and
//! tags outside the vocabulary all fall through untouched; the normalizer
//! and (optionally) strict mode deal with what's left.

use crate::config::ConvertConfig;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

// ── Opening-tag patterns, compiled once ──────────────────────────────────────

static RE_ROLE_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<role[^>]*>").unwrap());
static RE_TASK_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<task[^>]*>").unwrap());
static RE_CAPTIONED_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<[\w-]+[^>]*caption="([^"]*)"[^>]*>"#).unwrap());
static RE_LIST_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<list[^>]*>").unwrap());
static RE_ITEM_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*<item>\s*").unwrap());
static RE_EXAMPLE_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<example[^>]*>").unwrap());
static RE_HUMAN_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<HumanMessage[^>]*>").unwrap());
static RE_AI_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<AiMessage[^>]*>").unwrap());
static RE_INLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?(?:b|i|strong|em|p|poml)[^>]*>").unwrap());

/// Anything that still looks like markup after the rewrite pass: a comment
/// opener or an angle-bracket tag. Used by strict mode only.
static RE_LEFTOVER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<!--|</?[A-Za-z][\w-]*(?:\s[^>]*)?/?>").unwrap());

// ── Rule model ───────────────────────────────────────────────────────────────

/// What a rule emits in place of each opening tag it consumes.
#[derive(Debug, Clone)]
pub(crate) enum OpenPolicy {
    /// Remove the opening tag, emit nothing.
    Drop,
    /// Replace with a fixed label and colon, in place.
    Label(String),
    /// Replace with the captured `caption` attribute value and a colon,
    /// pushed onto a fresh line.
    Caption,
    /// Replace with an indented bullet marker on a fresh line.
    Bullet(String),
    /// Replace with a fixed marker on a fresh line (example banners,
    /// dialogue labels).
    Marker(String),
}

/// One substitution rule: recognises a single tag family.
pub(crate) struct TagRule {
    /// Family name, used in logs and the markup census.
    pub(crate) family: &'static str,
    open: &'static Lazy<Regex>,
    policy: OpenPolicy,
    /// Closing-tag literals removed with no replacement text.
    closers: &'static [&'static str],
}

impl TagRule {
    /// Apply this rule to the whole buffer.
    ///
    /// Returns the rewritten text and the number of opening tags consumed.
    pub(crate) fn apply(&self, input: &str) -> (String, usize) {
        let consumed = self.open.find_iter(input).count();
        let mut text = match &self.policy {
            OpenPolicy::Drop => self.open.replace_all(input, NoExpand("")).into_owned(),
            OpenPolicy::Label(label) => {
                let replacement = format!("{label}:");
                self.open
                    .replace_all(input, NoExpand(&replacement))
                    .into_owned()
            }
            OpenPolicy::Caption => self
                .open
                .replace_all(input, |caps: &regex::Captures<'_>| {
                    format!("\n{}:", &caps[1])
                })
                .into_owned(),
            OpenPolicy::Bullet(marker) | OpenPolicy::Marker(marker) => {
                let replacement = format!("\n{marker}");
                self.open
                    .replace_all(input, NoExpand(&replacement))
                    .into_owned()
            }
        };
        for closer in self.closers {
            if text.contains(closer) {
                text = text.replace(closer, "");
            }
        }
        (text, consumed)
    }
}

/// Build the ordered rule table for one conversion.
///
/// The patterns are fixed; only the replacement strings (labels, bullet
/// indent, example banner) come from the config.
pub(crate) fn rule_set(config: &ConvertConfig) -> Vec<TagRule> {
    vec![
        TagRule {
            family: "role",
            open: &RE_ROLE_OPEN,
            policy: OpenPolicy::Label("role".to_string()),
            closers: &["</role>"],
        },
        TagRule {
            family: "task",
            open: &RE_TASK_OPEN,
            policy: OpenPolicy::Label("task".to_string()),
            closers: &["</task>"],
        },
        TagRule {
            family: "captioned",
            open: &RE_CAPTIONED_OPEN,
            policy: OpenPolicy::Caption,
            closers: &["</cp>", "</stepwise-instructions>", "</context>"],
        },
        TagRule {
            family: "list",
            open: &RE_LIST_OPEN,
            policy: OpenPolicy::Drop,
            closers: &["</list>"],
        },
        TagRule {
            family: "item",
            open: &RE_ITEM_OPEN,
            policy: OpenPolicy::Bullet(format!("{}- ", " ".repeat(config.bullet_indent))),
            closers: &["</item>"],
        },
        TagRule {
            family: "example",
            open: &RE_EXAMPLE_OPEN,
            policy: OpenPolicy::Marker(config.example_banner.clone()),
            closers: &["</example>"],
        },
        TagRule {
            family: "dialogue-user",
            open: &RE_HUMAN_OPEN,
            policy: OpenPolicy::Marker(format!("{}:", config.user_label)),
            closers: &["</HumanMessage>"],
        },
        TagRule {
            family: "dialogue-ai",
            open: &RE_AI_OPEN,
            policy: OpenPolicy::Marker(format!("{}:", config.ai_label)),
            closers: &["</AiMessage>"],
        },
        TagRule {
            family: "inline",
            open: &RE_INLINE,
            policy: OpenPolicy::Drop,
            closers: &[],
        },
    ]
}

/// Run the full rule table over `input` in order.
pub fn rewrite_tags(input: &str, config: &ConvertConfig) -> String {
    rule_set(config)
        .iter()
        .fold(input.to_string(), |text, rule| rule.apply(&text).0)
}

/// First span that still looks like markup, if any. Strict mode reports it.
pub(crate) fn leftover_markup(input: &str) -> Option<&str> {
    RE_LEFTOVER.find(input).map(|m| m.as_str())
}
