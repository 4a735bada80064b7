//! Core data models for spendcap
//!
//! This module contains the accounting domain: money amounts, personal and
//! group expenses, users with spending limits, and the expense factory.

pub mod expense;
pub mod factory;
pub mod money;
pub mod user;

pub use expense::{Expense, ExpenseKind, GroupExpense, PersonalExpense};
pub use factory::ExpenseFactory;
pub use money::{Money, MoneyParseError};
pub use user::{validate_limit, validate_user_name, User};
