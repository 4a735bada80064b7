//! Expense factory
//!
//! Builds expenses from the kind names typed at the prompt or passed on the
//! command line ("personal" or "group").

use super::expense::{Expense, ExpenseKind};
use super::money::Money;
use crate::error::{TrackerError, TrackerResult};

/// Constructs personal or group expenses from a kind tag
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpenseFactory;

impl ExpenseFactory {
    pub fn new() -> Self {
        Self
    }

    /// Parse a user-facing kind name
    pub fn parse_kind(kind: &str) -> TrackerResult<ExpenseKind> {
        match kind.trim().to_lowercase().as_str() {
            "personal" => Ok(ExpenseKind::Personal),
            "group" => Ok(ExpenseKind::Group),
            other => Err(TrackerError::InvalidArgument(format!(
                "unsupported expense kind: '{}'",
                other
            ))),
        }
    }

    /// Create an expense of the given kind
    ///
    /// Personal expenses ignore `participants` and start without an owner;
    /// group expenses require at least one participant.
    pub fn create(
        &self,
        kind: &str,
        amount: Money,
        description: &str,
        participants: Option<Vec<String>>,
    ) -> TrackerResult<Expense> {
        match Self::parse_kind(kind)? {
            ExpenseKind::Personal => Expense::personal(amount, description),
            ExpenseKind::Group => {
                Expense::group(amount, description, participants.unwrap_or_default())
            }
        }
    }
}
