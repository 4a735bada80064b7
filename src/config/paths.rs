//! Path management for spendcap
//!
//! ## Path Resolution Order
//!
//! 1. `--data-dir` on the command line
//! 2. `SPENDCAP_DATA_DIR` environment variable (if set)
//! 3. The current working directory, so `users.csv` and `expenses.csv` sit
//!    beside wherever the tracker is run

use std::path::{Path, PathBuf};

use crate::error::TrackerError;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "SPENDCAP_DATA_DIR";

/// Manages all paths used by spendcap
#[derive(Debug, Clone)]
pub struct TrackerPaths {
    /// Directory holding the CSV files and config.json
    base_dir: PathBuf,
}

impl TrackerPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new() -> Result<Self, TrackerError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => std::env::current_dir().map_err(|e| {
                TrackerError::Config(format!("Could not determine current directory: {}", e))
            })?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (command-line override, tests)
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to users.csv
    pub fn users_file(&self) -> PathBuf {
        self.base_dir.join("users.csv")
    }

    /// Get the path to expenses.csv
    pub fn expenses_file(&self) -> PathBuf {
        self.base_dir.join("expenses.csv")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the data directory exists
    pub fn ensure_directories(&self) -> Result<(), TrackerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TrackerError::Io(format!("Failed to create data directory: {}", e)))
    }
}
