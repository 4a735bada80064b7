//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the finance tracker, plus the interactive menu.

pub mod expense;
pub mod menu;
pub mod user;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use menu::run_menu;
pub use user::{handle_user_command, UserCommands};

use crate::error::{TrackerError, TrackerResult};
use crate::models::Money;

/// Parse an amount argument, naming the field in the error
pub(crate) fn parse_money_arg(value: &str, field: &str) -> TrackerResult<Money> {
    Money::parse(value).map_err(|_| {
        TrackerError::InvalidArgument(format!(
            "Invalid {} '{}'. Use a number like '100' or '12.50'",
            field, value
        ))
    })
}
