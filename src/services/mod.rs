//! Service layer for spendcap
//!
//! The service layer provides the accounting logic on top of the models:
//! limit checks across users, the global ledger, reports, and persistence.

pub mod tracker;

pub use tracker::{FinanceTracker, LimitBreach, UserSummary, NO_EXPENSES};
