//! Session-progress store: load, mutate in memory, save on demand.
//!
//! The curriculum tooling keeps per-student progress in a JSON tracker
//! file. This module is that store's whole contract — read the current
//! state, hand it to the caller as plain data, persist it back atomically.
//! It is a collaborator of the session binary; the POML-to-TOON transducer
//! neither reads nor writes it and compiles without it.
//!
//! # Example
//!
//! ```rust
//! use poml2toon::{ModuleProgress, ModuleStatus, ProgressStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let store = ProgressStore::new(dir.path().join("progress.json"));
//!
//! let mut progress = store.create("Ada Lovelace", "2026-08-01")?;
//! progress.modules.insert(
//!     "module_01".into(),
//!     ModuleProgress {
//!         name: "Oscillators".into(),
//!         status: ModuleStatus::InProgress,
//!         ..Default::default()
//!     },
//! );
//! store.save(&progress)?;
//!
//! let reloaded = store.load()?;
//! assert_eq!(reloaded.student_name, "Ada Lovelace");
//! # Ok(())
//! # }
//! ```

use crate::error::ProgressError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Where a student stands on one curriculum module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// Progress record for a single module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleProgress {
    /// Human-readable module name.
    pub name: String,
    pub status: ModuleStatus,
    /// Lesson identifiers finished within this module.
    #[serde(default)]
    pub lessons_completed: Vec<String>,
    /// Free-form notes carried between sessions.
    #[serde(default)]
    pub notes: String,
}

/// The whole tracker: one student, many modules.
///
/// Modules are keyed by identifier (`module_01`, `module_02`, …); the
/// `BTreeMap` keeps them in curriculum order without a separate index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionProgress {
    pub student_name: String,
    /// Start date as written by the student (YYYY-MM-DD by convention).
    pub start_date: String,
    #[serde(default)]
    pub modules: BTreeMap<String, ModuleProgress>,
}

impl SessionProgress {
    /// A fresh tracker with no modules yet.
    pub fn new(student_name: impl Into<String>, start_date: impl Into<String>) -> Self {
        Self {
            student_name: student_name.into(),
            start_date: start_date.into(),
            modules: BTreeMap::new(),
        }
    }

    /// Number of completed modules.
    pub fn completed_count(&self) -> usize {
        self.modules
            .values()
            .filter(|m| m.status == ModuleStatus::Completed)
            .count()
    }

    /// Total number of modules in the tracker.
    pub fn total_count(&self) -> usize {
        self.modules.len()
    }

    /// The first module currently in progress, if any.
    pub fn current_module(&self) -> Option<(&str, &ModuleProgress)> {
        self.modules
            .iter()
            .find(|(_, m)| m.status == ModuleStatus::InProgress)
            .map(|(id, m)| (id.as_str(), m))
    }

    /// The first module not yet started, if any.
    pub fn next_module(&self) -> Option<(&str, &ModuleProgress)> {
        self.modules
            .iter()
            .find(|(_, m)| m.status == ModuleStatus::NotStarted)
            .map(|(id, m)| (id.as_str(), m))
    }
}

/// File-backed store with a load / create / save contract.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the tracker from disk.
    ///
    /// A missing file is [`ProgressError::TrackerNotFound`], distinct from
    /// unreadable or corrupt trackers, so callers can offer to create one.
    pub fn load(&self) -> Result<SessionProgress, ProgressError> {
        if !self.path.exists() {
            return Err(ProgressError::TrackerNotFound {
                path: self.path.clone(),
            });
        }
        let text = std::fs::read_to_string(&self.path).map_err(|e| ProgressError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        serde_json::from_str(&text).map_err(|e| ProgressError::MalformedTracker {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Create and persist a fresh tracker, building missing parent
    /// directories (one portfolio directory per student, by convention).
    pub fn create(
        &self,
        student_name: &str,
        start_date: &str,
    ) -> Result<SessionProgress, ProgressError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ProgressError::Io {
                    path: self.path.clone(),
                    source: e,
                })?;
            }
        }
        let progress = SessionProgress::new(student_name, start_date);
        self.save(&progress)?;
        info!("Created progress tracker at {}", self.path.display());
        Ok(progress)
    }

    /// Persist the tracker atomically (temp file + rename).
    pub fn save(&self, progress: &SessionProgress) -> Result<(), ProgressError> {
        let json = serde_json::to_string_pretty(progress).map_err(|e| {
            ProgressError::MalformedTracker {
                path: self.path.clone(),
                source: e,
            }
        })?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json).map_err(|e| ProgressError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| ProgressError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SessionProgress {
        let mut p = SessionProgress::new("Ada", "2026-08-01");
        p.modules.insert(
            "module_01".into(),
            ModuleProgress {
                name: "Oscillators".into(),
                status: ModuleStatus::Completed,
                lessons_completed: vec!["1.1".into(), "1.2".into()],
                notes: String::new(),
            },
        );
        p.modules.insert(
            "module_02".into(),
            ModuleProgress {
                name: "Filters".into(),
                status: ModuleStatus::InProgress,
                lessons_completed: vec!["2.1".into()],
                notes: "revisit resonance".into(),
            },
        );
        p.modules.insert(
            "module_03".into(),
            ModuleProgress {
                name: "Envelopes".into(),
                status: ModuleStatus::NotStarted,
                ..Default::default()
            },
        );
        p
    }

    #[test]
    fn summary_helpers() {
        let p = sample();
        assert_eq!(p.completed_count(), 1);
        assert_eq!(p.total_count(), 3);
        assert_eq!(p.current_module().unwrap().0, "module_02");
        assert_eq!(p.next_module().unwrap().0, "module_03");
    }

    #[test]
    fn load_missing_is_tracker_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProgressStore::new(dir.path().join("nope.json"));
        assert!(matches!(
            store.load(),
            Err(ProgressError::TrackerNotFound { .. })
        ));
    }

    #[test]
    fn create_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProgressStore::new(dir.path().join("portfolio").join("ada").join("progress.json"));

        let mut progress = store.create("Ada", "2026-08-01").unwrap();
        assert!(store.path().exists());

        progress.modules.insert(
            "module_01".into(),
            ModuleProgress {
                name: "Oscillators".into(),
                status: ModuleStatus::InProgress,
                ..Default::default()
            },
        );
        store.save(&progress).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.student_name, "Ada");
        assert_eq!(reloaded.modules["module_01"].name, "Oscillators");
        assert_eq!(reloaded.modules["module_01"].status, ModuleStatus::InProgress);
    }

    #[test]
    fn corrupt_tracker_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = ProgressStore::new(&path);
        assert!(matches!(
            store.load(),
            Err(ProgressError::MalformedTracker { .. })
        ));
    }

    #[test]
    fn status_serialises_snake_case() {
        let json = serde_json::to_string(&ModuleStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let back: ModuleStatus = serde_json::from_str("\"not_started\"").unwrap();
        assert_eq!(back, ModuleStatus::NotStarted);
    }
}
