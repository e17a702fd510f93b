//! Snapshot persistence.
//!
//! Saves are a single [`SaveSnapshot`] per store: the full [`PlayerState`]
//! plus a capture timestamp and schema version, bincode-encoded. The sled
//! store is the shipping backend; the in-memory store backs tests and
//! frontends that manage their own persistence.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::engine::errors::EngineError;
use crate::engine::state::PlayerState;
use crate::engine::types::SNAPSHOT_SCHEMA_VERSION;

const SAVE_TREE: &str = "saves";
const SAVE_KEY: &[u8] = b"current";

/// One saved game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveSnapshot {
    pub schema_version: u8,
    pub saved_at: DateTime<Utc>,
    pub state: PlayerState,
}

impl SaveSnapshot {
    pub fn capture(state: PlayerState) -> Self {
        SaveSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            saved_at: Utc::now(),
            state,
        }
    }

    fn check_schema(self) -> Result<Self, EngineError> {
        if self.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(EngineError::SchemaMismatch {
                entity: "save snapshot",
                expected: SNAPSHOT_SCHEMA_VERSION,
                found: self.schema_version,
            });
        }
        Ok(self)
    }
}

/// A place saved games live. One slot per store.
pub trait SaveStore {
    fn save_snapshot(&self, snapshot: &SaveSnapshot) -> Result<(), EngineError>;
    fn load_snapshot(&self) -> Result<Option<SaveSnapshot>, EngineError>;
}

/// Sled-backed save store, one tree in the game's data directory.
pub struct SledSaveStore {
    _db: sled::Db,
    tree: sled::Tree,
}

impl SledSaveStore {
    /// Open (creating if needed) the save database under `data_dir`.
    pub fn open(data_dir: &Path) -> Result<Self, EngineError> {
        std::fs::create_dir_all(data_dir)?;
        let db = sled::open(data_dir.join("saves.sled"))?;
        let tree = db.open_tree(SAVE_TREE)?;
        Ok(SledSaveStore { _db: db, tree })
    }
}

impl SaveStore for SledSaveStore {
    fn save_snapshot(&self, snapshot: &SaveSnapshot) -> Result<(), EngineError> {
        let bytes = bincode::serialize(snapshot)?;
        self.tree.insert(SAVE_KEY, bytes)?;
        self.tree.flush()?;
        info!(
            "saved game at {} (room {})",
            snapshot.saved_at, snapshot.state.current_room
        );
        Ok(())
    }

    fn load_snapshot(&self) -> Result<Option<SaveSnapshot>, EngineError> {
        let Some(bytes) = self.tree.get(SAVE_KEY)? else {
            debug!("no save present");
            return Ok(None);
        };
        let snapshot: SaveSnapshot = bincode::deserialize(&bytes)?;
        snapshot.check_schema().map(Some)
    }
}

/// In-memory single-slot store.
#[derive(Default)]
pub struct MemorySaveStore {
    slot: Mutex<Option<Vec<u8>>>,
}

impl SaveStore for MemorySaveStore {
    fn save_snapshot(&self, snapshot: &SaveSnapshot) -> Result<(), EngineError> {
        let bytes = bincode::serialize(snapshot)?;
        *self.slot.lock().unwrap() = Some(bytes);
        Ok(())
    }

    fn load_snapshot(&self) -> Result<Option<SaveSnapshot>, EngineError> {
        let guard = self.slot.lock().unwrap();
        match guard.as_deref() {
            Some(bytes) => {
                let snapshot: SaveSnapshot = bincode::deserialize(bytes)?;
                snapshot.check_schema().map(Some)
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_a_snapshot() {
        let store = MemorySaveStore::default();
        assert!(store.load_snapshot().unwrap().is_none());

        let mut state = PlayerState::new("Dale", "controlnexus");
        state.score = 42;
        state.inventory.insert("coffee".to_string());
        store.save_snapshot(&SaveSnapshot::capture(state)).unwrap();

        let loaded = store.load_snapshot().unwrap().expect("snapshot present");
        assert_eq!(loaded.state.score, 42);
        assert!(loaded.state.inventory.contains("coffee"));
    }

    #[test]
    fn schema_mismatch_is_rejected_on_load() {
        let store = MemorySaveStore::default();
        let mut snapshot = SaveSnapshot::capture(PlayerState::new("Dale", "controlnexus"));
        snapshot.schema_version = 99;
        store.save_snapshot(&snapshot).unwrap();
        assert!(matches!(
            store.load_snapshot(),
            Err(EngineError::SchemaMismatch { found: 99, .. })
        ));
    }

    #[test]
    fn sled_store_round_trips_on_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = SledSaveStore::open(dir.path()).unwrap();
        let state = PlayerState::new("Polly", "greasystoon");
        store.save_snapshot(&SaveSnapshot::capture(state)).unwrap();
        let loaded = store.load_snapshot().unwrap().expect("snapshot present");
        assert_eq!(loaded.state.current_room, "greasystoon");
    }
}
