//! Pipeline stages for POML-to-TOON conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! adjust one (e.g. the rewrite rule table) without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ comments ──▶ rewrite ──▶ normalize
//! (path)    (strip)      (tag rules)  (line cleanup)
//! ```
//!
//! 1. [`input`]     — read the user-supplied path into a UTF-8 string,
//!    keeping not-found, permission, and encoding failures distinct
//! 2. [`comments`]  — remove `<!-- ... -->` spans, including multi-line ones
//! 3. [`rewrite`]   — apply the ordered tag-rule table, one rule per tag
//!    family, replacing markup with labels, bullets, and banners
//! 4. [`normalize`] — trim every line, drop the empty ones, restore bullet
//!    indentation, and re-join
//!
//! Stage N's output text is stage N+1's input text; no stage looks ahead.

pub mod comments;
pub mod input;
pub mod normalize;
pub mod rewrite;
