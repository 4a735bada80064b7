//! Expense CLI commands
//!
//! Implements CLI commands for recording and listing expenses.

use clap::Subcommand;

use crate::display::format_expense_list;
use crate::error::{TrackerError, TrackerResult};
use crate::services::FinanceTracker;
use crate::storage::Storage;

use super::parse_money_arg;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// User paying the expense
        user: String,
        /// Amount (e.g., "30" or "12.50")
        amount: String,
        /// What the money was spent on
        description: String,
        /// Share the expense with these users (comma-separated, payer is included)
        #[arg(short, long, value_delimiter = ',')]
        group: Option<Vec<String>>,
    },
    /// List every recorded expense
    List,
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    tracker: &mut FinanceTracker,
    cmd: ExpenseCommands,
) -> TrackerResult<()> {
    match cmd {
        ExpenseCommands::Add {
            user,
            amount,
            description,
            group,
        } => {
            let amount = parse_money_arg(&amount, "amount")?;
            if tracker.find_user(&user).is_none() {
                return Err(TrackerError::user_not_found(&user));
            }

            let expense = match group {
                Some(others) => {
                    let participants = std::iter::once(user.clone())
                        .chain(others.into_iter().map(|n| n.trim().to_string()))
                        .filter(|n| !n.is_empty())
                        .collect();
                    tracker.record_group(amount, &description, participants)?
                }
                None => tracker.record_personal(&user, amount, &description)?,
            };

            println!("Expense added: {}", expense);
            println!("  Share per user: {}", expense.effective_share());
            storage.save_tracker(tracker)?;
        }

        ExpenseCommands::List => {
            print!("{}", format_expense_list(tracker));
        }
    }

    Ok(())
}
