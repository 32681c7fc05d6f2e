//! State store adapters.
//!
//! The JSON file store keeps one envelope per installation:
//!
//! ```json
//! { "version": 1, "savedAt": "2025-06-01T12:00:00Z", "state": { "happinessStates": {}, ... } }
//! ```
//!
//! Writes go to a sibling temp file first and are renamed into place, so a
//! crash mid-write never leaves a truncated record behind. A record that
//! cannot be read is moved aside to `<name>.corrupt` before the error is
//! returned, so the next save starts a new file instead of overwriting it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use civicsim_domain::CivicProgress;
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::{ClockPort, RepoError, StateStore};

const ENVELOPE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateEnvelope {
    version: u32,
    saved_at: DateTime<Utc>,
    state: CivicProgress,
}

/// Progress persisted as pretty-printed JSON on disk.
pub struct JsonFileStateStore {
    path: PathBuf,
    clock: Arc<dyn ClockPort>,
}

impl JsonFileStateStore {
    pub fn new(path: impl Into<PathBuf>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling_path(".tmp")
    }

    fn corrupt_path(&self) -> PathBuf {
        self.sibling_path(".corrupt")
    }

    fn quarantine(&self, error: RepoError) -> RepoError {
        let target = self.corrupt_path();
        match fs::rename(&self.path, &target) {
            Ok(()) => tracing::warn!(
                error = %error,
                moved_to = %target.display(),
                "Unreadable state file moved aside"
            ),
            Err(e) => tracing::warn!(error = %e, "Failed to move unreadable state file aside"),
        }
        error
    }

    fn parse(raw: &str) -> Result<StateEnvelope, RepoError> {
        let envelope: StateEnvelope = serde_json::from_str(raw).map_err(RepoError::serialization)?;
        if envelope.version != ENVELOPE_VERSION {
            return Err(RepoError::serialization(format!(
                "unsupported state version {}",
                envelope.version
            )));
        }
        Ok(envelope)
    }
}

impl StateStore for JsonFileStateStore {
    fn load(&self) -> Result<Option<CivicProgress>, RepoError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RepoError::storage("load", e)),
        };
        let envelope = Self::parse(&raw).map_err(|e| self.quarantine(e))?;
        tracing::debug!(
            path = %self.path.display(),
            saved_at = %envelope.saved_at,
            "Loaded simulation state"
        );
        Ok(Some(envelope.state))
    }

    fn save(&self, progress: &CivicProgress) -> Result<(), RepoError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| RepoError::storage("create_dir", e))?;
        }
        let envelope = StateEnvelope {
            version: ENVELOPE_VERSION,
            saved_at: self.clock.now(),
            state: progress.clone(),
        };
        let data = serde_json::to_string_pretty(&envelope).map_err(RepoError::serialization)?;

        let temp = self.temp_path();
        fs::write(&temp, data).map_err(|e| RepoError::storage("save", e))?;
        fs::rename(&temp, &self.path).map_err(|e| RepoError::storage("rename", e))?;
        Ok(())
    }

    fn remove(&self) -> Result<(), RepoError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RepoError::storage("remove", e)),
        }
    }
}

/// Volatile store, used by tests and by `--ephemeral` runs.
#[derive(Default)]
pub struct InMemoryStateStore {
    record: Mutex<Option<CivicProgress>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(progress: CivicProgress) -> Self {
        Self {
            record: Mutex::new(Some(progress)),
        }
    }
}

impl StateStore for InMemoryStateStore {
    fn load(&self) -> Result<Option<CivicProgress>, RepoError> {
        let guard = self
            .record
            .lock()
            .map_err(|e| RepoError::storage("load", e))?;
        Ok(guard.clone())
    }

    fn save(&self, progress: &CivicProgress) -> Result<(), RepoError> {
        let mut guard = self
            .record
            .lock()
            .map_err(|e| RepoError::storage("save", e))?;
        *guard = Some(progress.clone());
        Ok(())
    }

    fn remove(&self) -> Result<(), RepoError> {
        let mut guard = self
            .record
            .lock()
            .map_err(|e| RepoError::storage("remove", e))?;
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::MockClockPort;
    use chrono::TimeZone;
    use civicsim_domain::{ActorId, ConversationTurn, IssueKey};

    fn clock() -> Arc<dyn ClockPort> {
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()))
    }

    fn sample() -> CivicProgress {
        let mut progress = CivicProgress::new();
        progress.append_turn(ActorId::new("parent"), ConversationTurn::npc("Kids are in danger!"));
        progress
            .mark_completed(IssueKey::new("scooter"), ActorId::new("parent"))
            .unwrap();
        progress
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStateStore::new(dir.path().join("state.json"), clock());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_restores_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut clock = MockClockPort::new();
        clock
            .expect_now()
            .times(1)
            .returning(|| Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap());
        let store = JsonFileStateStore::new(
            dir.path().join("nested").join("state.json"),
            Arc::new(clock),
        );

        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
        assert!(!store.temp_path().exists());

        let raw = fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["savedAt"], "2025-06-01T12:00:00Z");
        assert_eq!(json["state"]["completionSets"]["scooter"][0], "parent");
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStateStore::new(dir.path().join("state.json"), clock());
        store.save(&sample()).unwrap();
        store.remove().unwrap();
        store.remove().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_file_is_moved_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStateStore::new(path.clone(), clock());

        assert!(matches!(store.load(), Err(RepoError::Serialization(_))));
        assert!(!path.exists());
        assert_eq!(fs::read_to_string(store.corrupt_path()).unwrap(), "{ not json");

        // The next save leaves the unreadable record alone.
        store.save(&sample()).unwrap();
        assert_eq!(fs::read_to_string(store.corrupt_path()).unwrap(), "{ not json");
        assert_eq!(store.load().unwrap(), Some(sample()));
    }

    #[test]
    fn oversized_completion_set_loads_first_four() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(
            &path,
            r#"{"version":1,"savedAt":"2025-06-01T12:00:00Z","state":{"completionSets":{"pet":["a","b","c","d","e"]}}}"#,
        )
        .unwrap();
        let store = JsonFileStateStore::new(path, clock());
        let progress = store.load().unwrap().unwrap();
        assert_eq!(progress.completed_count(&IssueKey::new("pet")), 4);
        assert!(!progress.is_completed(&IssueKey::new("pet"), &ActorId::new("e")));
    }

    #[test]
    fn in_memory_store_round_trips() {
        let store = InMemoryStateStore::new();
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
        store.remove().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
