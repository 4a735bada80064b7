//! Ledger display formatting

use crate::services::FinanceTracker;

/// Format the ledger, one expense per line
pub fn format_expense_list(tracker: &FinanceTracker) -> String {
    tracker.print_expenses().map(|line| line + "\n").collect()
}
