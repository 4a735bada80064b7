//! Storage layer for spendcap
//!
//! Two headerless CSV files in the data directory: `users.csv` holds the
//! user registry and `expenses.csv` the ledger. Both are rewritten in full
//! on every save.

pub mod expenses;
pub mod file_io;
pub mod users;

pub use expenses::{read_expense_records, write_expense_records, ExpenseRecord};
pub use file_io::{read_csv_records, write_csv_records};
pub use users::{read_users, write_users, UserRecord};

use crate::config::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::services::FinanceTracker;

/// Main storage coordinator for the users and expenses files
pub struct Storage {
    paths: TrackerPaths,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TrackerPaths) -> Result<Self, TrackerError> {
        paths.ensure_directories()?;
        Ok(Self { paths })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    /// Load users, then the ledger resolved against them
    pub fn load_tracker(&self) -> Result<FinanceTracker, TrackerError> {
        let users = read_users(self.paths.users_file())?;
        let mut tracker = FinanceTracker::new(users);
        tracker.load_from_file(self.paths.expenses_file())?;
        Ok(tracker)
    }

    /// Rewrite both files from the tracker's current state
    pub fn save_tracker(&self, tracker: &FinanceTracker) -> Result<(), TrackerError> {
        tracker.save_users(self.paths.users_file())?;
        tracker.save_to_file(self.paths.expenses_file())?;
        Ok(())
    }

    /// Check if any data has been written yet
    pub fn is_initialized(&self) -> bool {
        self.paths.users_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().join("data"));
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());

        let tracker = storage.load_tracker().unwrap();
        assert!(tracker.users().is_empty());
        assert!(tracker.expenses().is_empty());
    }

    #[test]
    fn test_save_and_reload_tracker() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(TrackerPaths::with_base_dir(temp_dir.path())).unwrap();

        let mut tracker = FinanceTracker::default();
        tracker.add_user("Alice", Money::new(100.0)).unwrap();
        tracker.add_user("Bob", Money::new(50.0)).unwrap();
        tracker
            .record_group(
                Money::new(40.0),
                "Dinner",
                vec!["Alice".to_string(), "Bob".to_string()],
            )
            .unwrap();
        tracker
            .record_personal("Alice", Money::new(30.0), "Lunch")
            .unwrap();
        storage.save_tracker(&tracker).unwrap();
        assert!(storage.is_initialized());

        let reloaded = storage.load_tracker().unwrap();
        assert_eq!(reloaded.users().len(), 2);
        assert_eq!(reloaded.expenses().len(), 2);
        assert_eq!(
            reloaded.find_user("Alice").unwrap().total_expenses(),
            Money::new(50.0)
        );
        assert_eq!(
            reloaded.find_user("Bob").unwrap().total_expenses(),
            Money::new(20.0)
        );
    }
}
