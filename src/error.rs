//! Error types for the poml2toon library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ConvertError`] — the conversion of one document cannot proceed or
//!   complete (missing file, unreadable bytes, strict-mode rejection).
//!   Returned as `Err(ConvertError)` from the top-level `convert*` functions.
//!
//! * [`ProgressError`] — the session-progress store failed to load, parse,
//!   or persist its tracker file. The store is a collaborator of the session
//!   binary only; the transducer itself never produces this type.
//!
//! The separation keeps the transducer's error surface independent of the
//! progress store: a corrupt tracker can never fail a conversion, and vice
//! versa.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the conversion entry points.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("POML file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but its bytes are not valid UTF-8.
    #[error("File '{path}' is not valid UTF-8 text\nPOML documents must be UTF-8 encoded.")]
    InvalidEncoding { path: PathBuf },

    /// Reading the file failed for a reason other than the above.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Conversion errors ─────────────────────────────────────────────────
    /// Strict mode found markup that survived the rewrite pipeline.
    ///
    /// Only produced when [`crate::config::ConvertConfig::strict`] is set;
    /// the default behaviour leaves unrecognised markup in the output.
    #[error("Malformed markup: {detail}\nRe-run without --strict for best-effort output.")]
    MalformedMarkup { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors from the session-progress store.
///
/// Kept separate from [`ConvertError`] because the store belongs to the
/// session tooling, not to the transducer.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// No tracker file exists at the configured path.
    #[error("No progress tracker found at '{path}'\nCreate one with: poml2toon-session --student <NAME> --start-date <YYYY-MM-DD>")]
    TrackerNotFound { path: PathBuf },

    /// The tracker file exists but is not valid tracker JSON.
    #[error("Progress tracker '{path}' is corrupt: {source}")]
    MalformedTracker {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing the tracker file failed.
    #[error("Progress tracker I/O failed at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
