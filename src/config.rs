//! Where the application keeps its files.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".bed-capacity-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "capacity.sqlite";
const LOG_FILE_NAME: &str = "bed-capacity.log";

/// Value of `--db` that selects a throwaway in-memory database.
pub const IN_MEMORY_DB: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_path: PathBuf,
}

impl AppConfig {
    /// Default layout under the user's home, with an optional database override.
    pub fn resolve(db_override: Option<PathBuf>) -> Result<Self> {
        let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(Self::in_dir(base_dirs.home_dir().join(DATA_DIR_NAME), db_override))
    }

    pub fn in_dir(data_dir: PathBuf, db_override: Option<PathBuf>) -> Self {
        let db_path = db_override.unwrap_or_else(|| data_dir.join(DB_FILE_NAME));
        let log_path = data_dir.join(LOG_FILE_NAME);
        Self {
            data_dir,
            db_path,
            log_path,
        }
    }

    pub fn uses_in_memory_db(&self) -> bool {
        self.db_path == Path::new(IN_MEMORY_DB)
    }
}
