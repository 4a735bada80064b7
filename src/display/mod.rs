//! Display formatting for terminal output
//!
//! Formats users, spending summaries and the ledger for the CLI commands and
//! the interactive menu.

pub mod expense;
pub mod report;
pub mod user;

pub use expense::format_expense_list;
pub use report::{format_amount, format_full_report};
pub use user::{format_user_limits, format_user_list};
