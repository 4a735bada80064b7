//! User display formatting
//!
//! Formats user spending summaries as a table, and the plain limit listing
//! shown when the menu exits.

use crate::models::User;
use crate::services::UserSummary;

use super::report::format_amount;

/// Format user summaries as a table
pub fn format_user_list(summaries: &[UserSummary], symbol: &str) -> String {
    if summaries.is_empty() {
        return "No users found.\n".to_string();
    }

    let name_width = summaries
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}  {:>12}  {:>12}  {:>8}  {}\n",
        "Name",
        "Limit",
        "Spent",
        "Remaining",
        "Expenses",
        "Status",
        name_width = name_width,
    ));

    output.push_str(&format!(
        "{:-<name_width$}  {:->12}  {:->12}  {:->12}  {:->8}  {:-<8}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for summary in summaries {
        let status = if summary.exceeded { "OVER" } else { "" };

        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {:>12}  {:>12}  {:>8}  {}\n",
            summary.name,
            format_amount(summary.limit, symbol),
            format_amount(summary.spent, symbol),
            format_amount(summary.remaining, symbol),
            summary.expense_count,
            status,
            name_width = name_width,
        ));
    }

    output
}

/// One `name: €limit` line per user
pub fn format_user_limits(users: &[User]) -> String {
    users.iter().map(|u| format!("{}\n", u)).collect()
}
