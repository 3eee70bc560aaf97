//! Spec history store — the last few generations, newest first.
//!
//! Layout:
//!   data/specs.json   — JSON array of `SpecRecord`, newest first, at most
//!                       `HISTORY_LIMIT` entries
//!
//! IDs are Unix-millisecond timestamps, bumped past the newest stored id when
//! two records are minted in the same millisecond.

use crate::error::{Result, SpecError};
use crate::io;
use crate::types::{SpecRecord, SpecSummary};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Maximum number of records kept in history.
pub const HISTORY_LIMIT: usize = 5;

// ---------------------------------------------------------------------------
// SpecStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SpecStore {
    path: PathBuf,
}

impl SpecStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load history. A missing, unreadable, or corrupt file yields an empty
    /// list; the failure is logged, never returned.
    pub fn load(&self) -> Vec<SpecRecord> {
        if !self.path.exists() {
            return Vec::new();
        }
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read spec history");
                return Vec::new();
            }
        };
        if content.trim().is_empty() {
            return Vec::new();
        }
        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to parse spec history");
                Vec::new()
            }
        }
    }

    /// Overwrite the whole history file with `records`.
    pub fn save(&self, records: &[SpecRecord]) -> Result<()> {
        let content = serde_json::to_string_pretty(records)?;
        io::atomic_write(&self.path, content.as_bytes())
    }

    /// Mint an id for a record created at `now`, strictly greater than any stored id.
    pub fn mint_id(&self, now: DateTime<Utc>) -> String {
        next_id(&self.load(), now)
    }

    /// Prepend `record`, evict anything past `HISTORY_LIMIT`, and persist.
    /// Returns the history as written.
    pub fn insert(&self, record: SpecRecord) -> Result<Vec<SpecRecord>> {
        let mut records = self.load();
        push_front(&mut records, record);
        self.save(&records)?;
        Ok(records)
    }

    /// Exact-match lookup by id.
    pub fn find(&self, id: &str) -> Result<SpecRecord> {
        self.load()
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| SpecError::NotFound(id.to_string()))
    }

    /// Summaries of the newest `HISTORY_LIMIT` records.
    pub fn summaries(&self) -> Vec<SpecSummary> {
        self.load()
            .iter()
            .take(HISTORY_LIMIT)
            .map(SpecRecord::summary)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Insert at the front and truncate to `HISTORY_LIMIT`.
pub fn push_front(records: &mut Vec<SpecRecord>, record: SpecRecord) {
    records.insert(0, record);
    records.truncate(HISTORY_LIMIT);
}

/// Millisecond timestamp id, bumped past the largest numeric id in `records`.
pub fn next_id(records: &[SpecRecord], now: DateTime<Utc>) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let newest = records
        .iter()
        .filter_map(|r| r.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    millis.max(newest.saturating_add(1)).to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GenerationRequest, Task, TaskSet};
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> SpecStore {
        SpecStore::new(dir.path().join("data").join("specs.json"))
    }

    fn record(id: &str, goal: &str) -> SpecRecord {
        SpecRecord::from_request(
            id.to_string(),
            Utc::now(),
            &GenerationRequest::new(goal, "users", "constraints"),
            TaskSet {
                user_stories: vec![Task::new("story", "desc")],
                engineering_tasks: vec![],
            },
        )
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).load().is_empty());
    }

    #[test]
    fn load_corrupt_file_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        std::fs::create_dir_all(s.path().parent().unwrap()).unwrap();
        std::fs::write(s.path(), "[{\"id\": \"1\", \"trunc").unwrap();
        assert!(s.load().is_empty());
    }

    #[test]
    fn save_creates_data_dir() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.save(&[record("1", "g")]).unwrap();
        assert!(dir.path().join("data").is_dir());
        assert_eq!(s.load().len(), 1);
    }

    #[test]
    fn insert_keeps_newest_first_and_caps_history() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        for i in 1..=7 {
            s.insert(record(&i.to_string(), &format!("goal {i}"))).unwrap();
        }
        let all = s.load();
        assert_eq!(all.len(), HISTORY_LIMIT);
        assert_eq!(all[0].id, "7");
        assert_eq!(all[4].id, "3");
    }

    #[test]
    fn find_returns_full_record_or_not_found() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.insert(record("42", "g")).unwrap();

        let found = s.find("42").unwrap();
        assert_eq!(found.tasks.user_stories.len(), 1);

        assert!(matches!(s.find("43"), Err(SpecError::NotFound(_))));
    }

    #[test]
    fn evicted_record_is_not_found() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        for i in 1..=6 {
            s.insert(record(&i.to_string(), "g")).unwrap();
        }
        assert!(matches!(s.find("1"), Err(SpecError::NotFound(_))));
        s.find("2").unwrap();
    }

    #[test]
    fn summaries_project_fields() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.insert(record("1", "first")).unwrap();
        s.insert(record("2", "second")).unwrap();
        let list = s.summaries();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].goal, "second");
    }

    #[test]
    fn next_id_uses_millis_and_stays_monotonic() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        assert_eq!(next_id(&[], now), "1700000000000");

        let existing = vec![record("1700000000000", "g")];
        assert_eq!(next_id(&existing, now), "1700000000001");
    }

    #[test]
    fn minted_ids_differ_for_back_to_back_records() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let now = Utc::now();
        let a = s.mint_id(now);
        s.insert(record(&a, "g")).unwrap();
        let b = s.mint_id(now);
        assert_ne!(a, b);
    }
}
