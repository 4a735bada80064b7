//! User CLI commands
//!
//! Implements CLI commands for managing users and their spending limits.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_user_list;
use crate::error::TrackerResult;
use crate::services::FinanceTracker;
use crate::storage::Storage;

use super::parse_money_arg;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Add a new user with a spending limit
    Add {
        /// User name (must be unique)
        name: String,
        /// Spending limit (e.g., "100" or "100.00")
        limit: String,
    },
    /// Change a user's spending limit
    Limit {
        /// User name
        name: String,
        /// New spending limit
        limit: String,
    },
    /// List users with their limits and spending
    List,
}

/// Handle a user command
pub fn handle_user_command(
    storage: &Storage,
    tracker: &mut FinanceTracker,
    settings: &Settings,
    cmd: UserCommands,
) -> TrackerResult<()> {
    match cmd {
        UserCommands::Add { name, limit } => {
            let limit = parse_money_arg(&limit, "limit")?;
            let user = tracker.add_user(&name, limit)?;
            println!("User {} added successfully.", user.name);
            println!("  Limit: {}", user.limit);
            storage.save_tracker(tracker)?;
        }

        UserCommands::Limit { name, limit } => {
            let limit = parse_money_arg(&limit, "limit")?;
            tracker.set_limit(&name, limit)?;
            println!("{}'s limit updated to {}", name, limit);

            if let Some(user) = tracker.find_user(&name) {
                if user.has_exceeded_limit() {
                    println!(
                        "  Note: {} has already spent {}, which is over the new limit.",
                        name,
                        user.total_expenses()
                    );
                }
            }
            storage.save_tracker(tracker)?;
        }

        UserCommands::List => {
            print!(
                "{}",
                format_user_list(&tracker.user_summaries(), &settings.currency_symbol)
            );
        }
    }

    Ok(())
}
