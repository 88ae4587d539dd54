use rusqlite::{Connection, OptionalExtension};
use std::path::PathBuf;

use super::data::{collection_from_json, collection_to_json, Project};
use crate::config::Settings;
use crate::error::StorageError;

/// Durable home of the project list.
/// Reads and writes always cover the whole collection.
pub trait ProjectStore {
    /// Read the stored collection. An empty slot is an empty collection.
    fn load(&self) -> Result<Vec<Project>, StorageError>;

    /// Overwrite the stored collection
    fn save(&self, projects: &[Project]) -> Result<(), StorageError>;
}

/// The SqliteStore keeps the project list in a key-value table
/// of a local SQLite database, one row per storage key.
pub struct SqliteStore {
    conn: Connection,
    db_path: PathBuf,
    key: String,
}

impl SqliteStore {
    /// Open (or create) the database described by `settings`
    pub fn open(settings: &Settings) -> Result<Self, StorageError> {
        std::fs::create_dir_all(&settings.data_dir)?;

        let db_path = settings.db_path();
        let conn = Connection::open(&db_path)?;

        tracing::info!("Database opened at {}", db_path.display());

        let store = SqliteStore {
            conn,
            db_path,
            key: settings.storage_key.clone(),
        };
        store.init_schema()?;

        Ok(store)
    }

    /// Create the storage table if it doesn't exist
    fn init_schema(&self) -> Result<(), StorageError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS storage (
                key     TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Raw contents of the slot, if any
    fn read_slot(&self) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM storage WHERE key = ?1",
                [&self.key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Replace the raw contents of the slot
    fn write_slot(&self, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![&self.key, value],
        )?;
        Ok(())
    }
}

impl ProjectStore for SqliteStore {
    fn load(&self) -> Result<Vec<Project>, StorageError> {
        match self.read_slot()? {
            Some(json) => Ok(collection_from_json(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, projects: &[Project]) -> Result<(), StorageError> {
        let json = collection_to_json(projects)?;
        self.write_slot(&json)?;
        tracing::debug!("Saved {} projects", projects.len());
        Ok(())
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("db_path", &self.db_path)
            .field("key", &self.key)
            .finish()
    }
}

/// Stand-in used when no database could be opened.
/// Every call fails, so the app runs purely in memory.
#[derive(Debug, Clone)]
pub struct DetachedStore {
    reason: String,
}

impl DetachedStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl ProjectStore for DetachedStore {
    fn load(&self) -> Result<Vec<Project>, StorageError> {
        Err(StorageError::Unavailable(self.reason.clone()))
    }

    fn save(&self, _projects: &[Project]) -> Result<(), StorageError> {
        Err(StorageError::Unavailable(self.reason.clone()))
    }
}

/// Open the store for `settings`, or a detached one if that is impossible
pub fn open_store(settings: Option<&Settings>) -> Box<dyn ProjectStore> {
    let Some(settings) = settings else {
        tracing::warn!("No data directory available, projects will not be saved");
        return Box::new(DetachedStore::new("no data directory"));
    };

    match SqliteStore::open(settings) {
        Ok(store) => Box::new(store),
        Err(err) => {
            tracing::warn!("Could not open project database, projects will not be saved: {err}");
            Box::new(DetachedStore::new(err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::tests::{date, dragon};
    use crate::state::data::ProjectId;
    use chrono::Utc;
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(&Settings::at(dir.path())).unwrap();
        (dir, store)
    }

    #[test]
    fn test_empty_slot_loads_empty() {
        let (_dir, store) = open_temp();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::at(dir.path().join("nested"));

        let mut delivered = dragon();
        delivered.title = "Castle".to_string();
        delivered.delivered_date = Some(date("2024-05-01"));
        delivered.image = Some("data:image/png;base64,AAAA".to_string());
        let projects = vec![
            Project::from_data(ProjectId::random(), Utc::now(), dragon()),
            Project::from_data(ProjectId::random(), Utc::now(), delivered),
        ];

        {
            let store = SqliteStore::open(&settings).unwrap();
            store.save(&projects).unwrap();
        }

        let reopened = SqliteStore::open(&settings).unwrap();
        assert_eq!(reopened.load().unwrap(), projects);
    }

    #[test]
    fn test_save_overwrites_slot() {
        let (_dir, store) = open_temp();
        let project = Project::from_data(ProjectId::random(), Utc::now(), dragon());

        store.save(&[project.clone(), project.clone()]).unwrap();
        store.save(&[project.clone()]).unwrap();

        assert_eq!(store.load().unwrap(), vec![project]);
    }

    #[test]
    fn test_malformed_slot_is_corrupt() {
        let (_dir, store) = open_temp();
        store.write_slot("{not json").unwrap();

        assert!(matches!(store.load(), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let mut other = Settings::at(dir.path());
        other.storage_key = "other".to_string();

        let store = SqliteStore::open(&Settings::at(dir.path())).unwrap();
        store
            .save(&[Project::from_data(ProjectId::random(), Utc::now(), dragon())])
            .unwrap();

        let other_store = SqliteStore::open(&other).unwrap();
        assert!(other_store.load().unwrap().is_empty());
    }

    #[test]
    fn test_detached_store_fails() {
        let store = DetachedStore::new("offline");
        assert!(matches!(store.load(), Err(StorageError::Unavailable(_))));
        assert!(matches!(store.save(&[]), Err(StorageError::Unavailable(_))));
    }

    #[test]
    fn test_open_store_without_settings_is_detached() {
        let store = open_store(None);
        assert!(store.load().is_err());
    }
}
