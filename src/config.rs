use std::path::PathBuf;

/// Name of the application directory inside the user's data directory
const APP_DIR: &str = "print-tracker";

/// Database file holding the storage slot
const DB_FILE: &str = "print_tracker.db";

/// Key of the slot holding the serialized project list
pub const STORAGE_KEY: &str = "3d-printing-projects";

/// Default log filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "print_tracker=info";

/// Where and under which key the project list is stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl Settings {
    /// Settings for the current user.
    ///
    /// The data directory is:
    /// - Linux: ~/.local/share/print-tracker
    /// - macOS: ~/Library/Application Support/print-tracker
    /// - Windows: %APPDATA%\print-tracker
    ///
    /// Returns `None` when no home or data directory can be determined.
    pub fn for_current_user() -> Option<Self> {
        let base = dirs::data_dir().or_else(dirs::home_dir)?;
        Some(Self::at(base.join(APP_DIR)))
    }

    /// Settings rooted at an explicit directory
    pub fn at(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            storage_key: STORAGE_KEY.to_string(),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }
}
