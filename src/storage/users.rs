//! User records for users.csv
//!
//! One row per user: `name,limit`.

use std::path::Path;

use csv::StringRecord;
use tracing::{info, warn};

use crate::error::TrackerResult;
use crate::models::{validate_limit, validate_user_name, Money, User};

use super::file_io::{read_csv_records, write_csv_records};

/// A decoded users.csv row
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub name: String,
    pub limit: Money,
}

impl UserRecord {
    /// Decode a single CSV row
    pub fn from_record(record: &StringRecord) -> Result<Self, String> {
        if record.len() != 2 {
            return Err(format!("expected 2 columns, found {}", record.len()));
        }

        let name = record[0].trim();
        validate_user_name(name).map_err(|e| e.to_string())?;

        let limit = Money::parse(&record[1]).map_err(|e| e.to_string())?;
        validate_limit(limit).map_err(|e| e.to_string())?;

        Ok(Self {
            name: name.to_string(),
            limit,
        })
    }

    pub fn to_row(&self) -> [String; 2] {
        [self.name.clone(), self.limit.value().to_string()]
    }
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            limit: user.limit,
        }
    }
}

/// Load users from disk
///
/// A missing file yields no users. Undecodable rows and repeated names are
/// skipped with a warning.
pub fn read_users<P: AsRef<Path>>(path: P) -> TrackerResult<Vec<User>> {
    let path = path.as_ref();
    let Some(records) = read_csv_records(path)? else {
        info!(path = %path.display(), "no existing users file");
        return Ok(Vec::new());
    };

    let mut users: Vec<User> = Vec::with_capacity(records.len());
    for (idx, record) in records.into_iter().enumerate() {
        let decoded = record.and_then(|r| UserRecord::from_record(&r));
        match decoded {
            Ok(rec) if users.iter().any(|u| u.name == rec.name) => {
                warn!(row = idx + 1, name = %rec.name, "skipping duplicate user");
            }
            Ok(rec) => users.push(User::new(rec.name, rec.limit)),
            Err(reason) => warn!(row = idx + 1, %reason, "skipping malformed user row"),
        }
    }

    Ok(users)
}

/// Overwrite users.csv with the given users
pub fn write_users<P: AsRef<Path>>(path: P, users: &[User]) -> TrackerResult<()> {
    write_csv_records(path, users.iter().map(|u| UserRecord::from(u).to_row()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.csv");

        let users = vec![
            User::new("Alice", Money::new(100.0)),
            User::new("Bob", Money::new(52.75)),
        ];
        write_users(&path, &users).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Alice,100\nBob,52.75\n");

        let loaded = read_users(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].name, "Alice");
        assert_eq!(loaded[1].limit, Money::new(52.75));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = read_users(temp_dir.path().join("users.csv")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_malformed_and_duplicate_rows_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.csv");
        fs::write(
            &path,
            "Alice,100\nBob\nCarol,lots\n,20\nAlice,5\nEve,-10\nDave,30.0\n",
        )
        .unwrap();

        let loaded = read_users(&path).unwrap();
        let names: Vec<_> = loaded.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Dave"]);
        assert_eq!(loaded[0].limit, Money::new(100.0));
    }
}
