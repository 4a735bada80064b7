//! User model
//!
//! A user has a spending limit and the list of expenses counted against it.
//! The list holds the same `Rc<Expense>` values as the tracker's ledger.

use std::fmt;
use std::rc::Rc;

use super::expense::Expense;
use super::money::Money;
use crate::error::{TrackerError, TrackerResult};

/// A person with a spending limit
#[derive(Debug, Clone)]
pub struct User {
    /// Unique name within a tracker
    pub name: String,

    /// Maximum cumulative share this user may accrue
    pub limit: Money,

    expenses: Vec<Rc<Expense>>,
}

impl User {
    /// Create a user with no expenses
    pub fn new(name: impl Into<String>, limit: Money) -> Self {
        Self {
            name: name.into(),
            limit,
            expenses: Vec::new(),
        }
    }

    /// Expenses attributed to this user, in insertion order
    pub fn expenses(&self) -> &[Rc<Expense>] {
        &self.expenses
    }

    /// Sum of this user's shares, recomputed on every call
    pub fn total_expenses(&self) -> Money {
        self.expenses.iter().map(|e| e.effective_share()).sum()
    }

    /// Whether adding `share` would push the total above the limit
    pub fn would_exceed(&self, share: Money) -> bool {
        self.total_expenses() + share > self.limit
    }

    /// Record an expense against this user
    ///
    /// Fails with `LimitExceeded` and leaves the user untouched if the share
    /// would take the total above the limit. The ledger is not updated here.
    pub fn add_expense(&mut self, expense: Rc<Expense>) -> TrackerResult<()> {
        let share = expense.effective_share();
        let total = self.total_expenses();

        if total + share > self.limit {
            return Err(TrackerError::LimitExceeded {
                user: self.name.clone(),
                share,
                total,
                limit: self.limit,
            });
        }

        self.expenses.push(expense);
        Ok(())
    }

    /// Append without a limit check, for previously validated data
    pub(crate) fn push_trusted(&mut self, expense: Rc<Expense>) {
        self.expenses.push(expense);
    }

    pub(crate) fn clear_expenses(&mut self) {
        self.expenses.clear();
    }

    /// True when the total is above the limit, e.g. after the limit was lowered
    pub fn has_exceeded_limit(&self) -> bool {
        self.total_expenses() > self.limit
    }

    /// Limit minus current total; negative once the limit is exceeded
    pub fn remaining(&self) -> Money {
        self.limit - self.total_expenses()
    }

    pub fn set_limit(&mut self, limit: Money) {
        self.limit = limit;
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.limit)
    }
}

/// Characters that cannot appear in a user name
///
/// `;` separates participants in expenses.csv and `,` separates names in
/// group participant lists typed at the prompt.
pub const RESERVED_NAME_CHARS: [char; 2] = [';', ','];

/// Check that a (trimmed) user name can be stored and referenced
pub fn validate_user_name(name: &str) -> TrackerResult<()> {
    if name.is_empty() {
        return Err(TrackerError::InvalidArgument(
            "user name cannot be empty".into(),
        ));
    }

    if name.contains(&RESERVED_NAME_CHARS[..]) {
        return Err(TrackerError::InvalidArgument(format!(
            "user name '{}' cannot contain ';' or ','",
            name
        )));
    }

    Ok(())
}

/// Check that a spending limit is a finite, non-negative amount
pub fn validate_limit(limit: Money) -> TrackerResult<()> {
    if limit.is_non_negative() {
        Ok(())
    } else {
        Err(TrackerError::InvalidArgument(format!(
            "limit must be zero or more, got {}",
            limit.value()
        )))
    }
}
