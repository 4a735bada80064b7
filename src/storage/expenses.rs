//! Expense records for expenses.csv
//!
//! One row per ledger entry: `kind,amount,description,parties`. For
//! `GroupExpense` rows the parties column is the participant names joined
//! with `;`; for `Expense` rows it is the owner's name.

use std::path::Path;

use csv::StringRecord;
use tracing::{info, warn};

use crate::error::TrackerResult;
use crate::models::{Expense, ExpenseKind, Money};

use super::file_io::{read_csv_records, write_csv_records};

/// Separator between participant names in the parties column
pub const PARTY_SEPARATOR: &str = ";";

/// A decoded expenses.csv row, with user names not yet resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub kind: ExpenseKind,
    pub amount: Money,
    pub description: String,
    pub parties: Vec<String>,
}

impl ExpenseRecord {
    /// Decode a single CSV row
    pub fn from_record(record: &StringRecord) -> Result<Self, String> {
        if record.len() != 4 {
            return Err(format!("expected 4 columns, found {}", record.len()));
        }

        let kind = ExpenseKind::from_tag(&record[0])
            .ok_or_else(|| format!("unknown expense kind '{}'", &record[0]))?;

        let amount = Money::parse(&record[1]).map_err(|e| e.to_string())?;
        if !amount.is_positive() {
            return Err(format!("amount must be positive, got {}", &record[1]));
        }

        let parties = record[3]
            .split(PARTY_SEPARATOR)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            kind,
            amount,
            description: record[2].to_string(),
            parties,
        })
    }

    pub fn to_row(&self) -> [String; 4] {
        [
            self.kind.as_tag().to_string(),
            self.amount.value().to_string(),
            self.description.clone(),
            self.parties.join(PARTY_SEPARATOR),
        ]
    }
}

impl From<&Expense> for ExpenseRecord {
    fn from(expense: &Expense) -> Self {
        Self {
            kind: expense.kind(),
            amount: expense.amount(),
            description: expense.description().to_string(),
            parties: expense
                .involved_users()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Load expense records from disk
///
/// A missing file yields no records. Undecodable rows are skipped with a
/// warning.
pub fn read_expense_records<P: AsRef<Path>>(path: P) -> TrackerResult<Vec<ExpenseRecord>> {
    let path = path.as_ref();
    let Some(records) = read_csv_records(path)? else {
        info!(path = %path.display(), "no existing expenses file");
        return Ok(Vec::new());
    };

    let mut decoded = Vec::with_capacity(records.len());
    for (idx, record) in records.into_iter().enumerate() {
        match record.and_then(|r| ExpenseRecord::from_record(&r)) {
            Ok(rec) => decoded.push(rec),
            Err(reason) => warn!(row = idx + 1, %reason, "skipping malformed expense row"),
        }
    }

    Ok(decoded)
}

/// Overwrite expenses.csv with the given records
pub fn write_expense_records<P, I>(path: P, records: I) -> TrackerResult<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = ExpenseRecord>,
{
    write_csv_records(path, records.into_iter().map(|r| r.to_row()))
}
