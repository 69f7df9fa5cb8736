//! Attempt history persistence.
//!
//! Attempts live in a single YAML document under one well-known path. The
//! file is only ever appended to; records that no longer parse are left in
//! place and skipped when listing.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::model::QuizAttempt;

pub trait AttemptStore: Send {
    /// Appends one attempt.
    fn save(&mut self, attempt: &QuizAttempt) -> Result<(), StoreError>;

    /// Every readable attempt, in storage order.
    fn list_all(&self) -> Result<Vec<QuizAttempt>, StoreError>;

    fn clear(&mut self) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredAttempt {
    id: String,
    date: String,
    score: u32,
    total_questions: u32,
    time_per_question: f64,
}

impl From<&QuizAttempt> for StoredAttempt {
    fn from(a: &QuizAttempt) -> Self {
        Self {
            id: a.id.clone(),
            date: a.date.to_rfc3339(),
            score: a.score,
            total_questions: a.total_questions,
            time_per_question: a.time_per_question,
        }
    }
}

impl StoredAttempt {
    fn into_attempt(self) -> Option<QuizAttempt> {
        let date = DateTime::parse_from_rfc3339(&self.date).ok()?;
        Some(QuizAttempt {
            id: self.id,
            date: date.with_timezone(&Utc),
            score: self.score,
            total_questions: self.total_questions,
            time_per_question: self.time_per_question,
        })
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct AttemptLog {
    #[serde(default)]
    attempts: Vec<serde_yaml::Value>,
}

#[derive(Debug, Clone)]
pub struct FileAttemptStore {
    path: PathBuf,
}

impl FileAttemptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_log(&self) -> Result<AttemptLog, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(AttemptLog::default());
            }
            Err(e) => return Err(StoreError::Io(e)),
        };
        if content.trim().is_empty() {
            return Ok(AttemptLog::default());
        }
        serde_yaml::from_str(&content).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "attempt history does not parse");
            StoreError::Corrupt(self.path.clone())
        })
    }
}

impl AttemptStore for FileAttemptStore {
    fn save(&mut self, attempt: &QuizAttempt) -> Result<(), StoreError> {
        let mut log = self.read_log()?;
        log.attempts
            .push(serde_yaml::to_value(StoredAttempt::from(attempt))?);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let yaml = serde_yaml::to_string(&log)?;
        atomic_write(&self.path, &yaml)?;
        debug!(id = %attempt.id, path = %self.path.display(), "attempt saved");
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<QuizAttempt>, StoreError> {
        let log = self.read_log()?;
        let mut attempts = Vec::with_capacity(log.attempts.len());
        for (i, value) in log.attempts.into_iter().enumerate() {
            let parsed = serde_yaml::from_value::<StoredAttempt>(value)
                .ok()
                .and_then(StoredAttempt::into_attempt);
            match parsed {
                Some(a) => attempts.push(a),
                None => warn!(index = i, "skipping malformed attempt record"),
            }
        }
        Ok(attempts)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

fn atomic_write(path: &Path, content: &str) -> Result<(), StoreError> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// In-memory store. `disabled()` builds one that fails every call, standing
/// in for storage that is unavailable.
#[derive(Debug, Default, Clone)]
pub struct MemoryAttemptStore {
    attempts: Vec<QuizAttempt>,
    disabled: bool,
}

impl MemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disabled() -> Self {
        Self {
            attempts: Vec::new(),
            disabled: true,
        }
    }
}

impl AttemptStore for MemoryAttemptStore {
    fn save(&mut self, attempt: &QuizAttempt) -> Result<(), StoreError> {
        if self.disabled {
            return Err(StoreError::Disabled);
        }
        self.attempts.push(attempt.clone());
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<QuizAttempt>, StoreError> {
        if self.disabled {
            return Err(StoreError::Disabled);
        }
        Ok(self.attempts.clone())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        if self.disabled {
            return Err(StoreError::Disabled);
        }
        self.attempts.clear();
        Ok(())
    }
}

pub fn export_attempts(attempts: &[QuizAttempt], path: &Path) -> Result<(), StoreError> {
    let log = AttemptLog {
        attempts: attempts
            .iter()
            .map(|a| serde_yaml::to_value(StoredAttempt::from(a)))
            .collect::<Result<_, _>>()?,
    };
    fs::write(path, serde_yaml::to_string(&log)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn attempt(id: &str, day: u32, score: u32) -> QuizAttempt {
        QuizAttempt {
            id: id.to_string(),
            date: Utc.with_ymd_and_hms(2026, 5, day, 9, 30, 0).unwrap(),
            score,
            total_questions: 5,
            time_per_question: 60.0,
        }
    }

    #[test]
    fn missing_file_lists_empty() {
        let dir = tempdir().unwrap();
        let store = FileAttemptStore::new(dir.path().join("attempts.yaml"));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn saves_append_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("attempts.yaml");
        let mut store = FileAttemptStore::new(&path);
        store.save(&attempt("1", 1, 3)).unwrap();
        store.save(&attempt("2", 2, 5)).unwrap();

        let reopened = FileAttemptStore::new(&path);
        let listed = reopened.list_all().unwrap();
        assert_eq!(listed, vec![attempt("1", 1, 3), attempt("2", 2, 5)]);

        let yaml = fs::read_to_string(&path).unwrap();
        assert!(yaml.contains("attempts:"));
        assert!(yaml.contains("total_questions: 5"));
        assert!(yaml.contains("2026-05-01T09:30:00+00:00"));
    }

    #[test]
    fn malformed_records_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("attempts.yaml");
        fs::write(
            &path,
            "attempts:\n\
             - id: good\n  date: 2026-05-03T10:00:00Z\n  score: 4\n  total_questions: 5\n  time_per_question: 60.0\n\
             - id: bad-date\n  date: yesterday\n  score: 1\n  total_questions: 5\n  time_per_question: 60.0\n\
             - id: missing-fields\n",
        )
        .unwrap();

        let mut store = FileAttemptStore::new(&path);
        let listed = store.list_all().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "good");

        // Appending keeps the unreadable records untouched.
        store.save(&attempt("new", 4, 2)).unwrap();
        let yaml = fs::read_to_string(&path).unwrap();
        assert!(yaml.contains("yesterday"));
        assert_eq!(store.list_all().unwrap().len(), 2);
    }

    #[test]
    fn corrupt_file_is_an_error_and_not_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("attempts.yaml");
        fs::write(&path, "attempts: [unclosed").unwrap();

        let mut store = FileAttemptStore::new(&path);
        assert!(matches!(store.list_all(), Err(StoreError::Corrupt(_))));
        assert!(store.save(&attempt("x", 1, 1)).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "attempts: [unclosed");
    }

    #[test]
    fn clear_removes_history() {
        let dir = tempdir().unwrap();
        let mut store = FileAttemptStore::new(dir.path().join("attempts.yaml"));
        store.save(&attempt("1", 1, 1)).unwrap();
        store.clear().unwrap();
        assert!(store.list_all().unwrap().is_empty());
        store.clear().unwrap();
    }

    #[test]
    fn disabled_memory_store_fails_loudly() {
        let mut store = MemoryAttemptStore::disabled();
        assert!(matches!(store.save(&attempt("1", 1, 1)), Err(StoreError::Disabled)));
        assert!(matches!(store.list_all(), Err(StoreError::Disabled)));
    }

    #[test]
    fn export_writes_readable_log() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("export.yaml");
        export_attempts(&[attempt("1", 1, 2)], &out).unwrap();
        let listed = FileAttemptStore::new(&out).list_all().unwrap();
        assert_eq!(listed, vec![attempt("1", 1, 2)]);
    }
}
