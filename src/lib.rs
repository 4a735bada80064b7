//! spendcap - Terminal expense tracker with per-user spending limits
//!
//! This library provides the core functionality for the spendcap expense
//! tracker. Users have spending limits; personal expenses count fully against
//! their owner and group expenses are split equally between participants. A
//! limit is enforced at the moment an expense is added, and a group expense is
//! only recorded if every participant stays within their limit.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and settings
//! - `error`: Custom error types
//! - `models`: Money, expenses, users and the expense factory
//! - `services`: The finance tracker (ledger, limit checks, reports)
//! - `storage`: CSV persistence of users and expenses
//! - `display`: Terminal formatting
//! - `cli`: Command handlers and the interactive menu
//!
//! # Example
//!
//! ```rust
//! use spendcap::models::{Money, User};
//! use spendcap::services::FinanceTracker;
//!
//! let mut tracker = FinanceTracker::new(vec![
//!     User::new("Alice", Money::new(100.0)),
//!     User::new("Bob", Money::new(50.0)),
//! ]);
//!
//! tracker
//!     .record_group(Money::new(40.0), "Dinner", vec!["Alice".into(), "Bob".into()])
//!     .unwrap();
//!
//! assert_eq!(
//!     tracker.find_user("Bob").unwrap().total_expenses(),
//!     Money::new(20.0)
//! );
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
