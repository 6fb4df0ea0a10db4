//! Application state management

use std::path::PathBuf;

use hackos_core::Database;
use tracing::info;

use crate::config::{project_dirs, AppConfig};
use crate::error::Result;

pub const DATABASE_FILE: &str = "hackos.db";

/// Process-wide settings and locations
pub struct AppState {
    config: AppConfig,
    data_dir: PathBuf,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let data_dir = match &config.workspace.data_dir {
            Some(dir) => dir.clone(),
            None => project_dirs()?.data_dir().to_path_buf(),
        };
        Self::with_data_dir(config, data_dir)
    }

    pub fn with_data_dir(config: AppConfig, data_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)?;
        info!(data_dir = %data_dir.display(), "Using data directory");
        Ok(Self { config, data_dir })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    /// Open the local database. The workspace store takes ownership of it.
    pub fn open_database(&self) -> Result<Database> {
        Ok(Database::open(self.database_path())?)
    }
}
