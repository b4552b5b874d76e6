//! # poml2toon
//!
//! Convert POML prompt markup to the terse TOON notation.
//!
//! ## Why this crate?
//!
//! POML is pleasant to author — explicit containers, captions, lists,
//! dialogue examples — but verbose to ship inside a prompt. TOON keeps the
//! same content as plain indented lines: labels instead of tags, bullets
//! instead of `<item>` pairs, one logical element per line. The conversion
//! is deliberately one-way and lossy; the output is for humans and LLMs,
//! not for round-tripping back to markup.
//!
//! ## Pipeline Overview
//!
//! ```text
//! POML
//!  │
//!  ├─ 1. Input      read the file, validate UTF-8
//!  ├─ 2. Comments   strip <!-- ... --> spans
//!  ├─ 3. Rewrite    ordered tag rules → labels / bullets / banners
//!  ├─ 4. Normalize  trim lines, drop empties, restore bullet indent
//!  └─ 5. Output     TOON text + conversion stats
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use poml2toon::{convert_document, ConvertConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let poml = "<role>\nYou are a helpful tutor.\n</role>\n\
//! <list>\n<item>Be concise</item>\n<item>Be kind</item>\n</list>\n";
//!
//! let output = convert_document(poml, &ConvertConfig::default())?;
//! assert_eq!(
//!     output.toon,
//!     "role:\nYou are a helpful tutor.\n  - Be concise\n  - Be kind"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `poml2toon` and `poml2toon-session` binaries (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only
//! deps:
//! ```toml
//! poml2toon = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConvertConfig, ConvertConfigBuilder};
pub use convert::{census, convert_document, convert_file, convert_file_to, inspect};
pub use error::{ConvertError, ProgressError};
pub use output::{ConvertOutput, ConvertStats, MarkupSummary};
pub use progress::{ModuleProgress, ModuleStatus, ProgressStore, SessionProgress};
