//! Report formatting utilities for terminal output

use crate::models::Money;
use crate::services::FinanceTracker;

use super::expense::format_expense_list;
use super::user::format_user_list;

/// Format an amount with two decimals and the configured currency symbol
pub fn format_amount(amount: Money, symbol: &str) -> String {
    let value = amount.value();
    if value < 0.0 {
        format!("-{}{:.2}", symbol, -value)
    } else {
        format!("{}{:.2}", symbol, value)
    }
}

/// Format a header line underlined to its own width
pub fn format_header(title: &str) -> String {
    format!("{}\n{}\n", title, "=".repeat(title.chars().count()))
}

/// Users table, ledger listing and ledger total in one block
pub fn format_full_report(tracker: &FinanceTracker, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format_header("Users"));
    output.push_str(&format_user_list(&tracker.user_summaries(), symbol));
    output.push('\n');

    output.push_str(&format_header("Expenses"));
    output.push_str(&format_expense_list(tracker));
    output.push_str(&format!(
        "\nLedger total: {}\n",
        format_amount(tracker.ledger_total(), symbol)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Money::new(3.0), "€"), "€3.00");
        assert_eq!(format_amount(Money::new(10.0 / 3.0), "€"), "€3.33");
        assert_eq!(format_amount(Money::new(-30.0), "$"), "-$30.00");
    }

    #[test]
    fn test_format_header() {
        assert_eq!(format_header("Users"), "Users\n=====\n");
    }

    #[test]
    fn test_full_report() {
        let mut tracker = FinanceTracker::new(vec![User::new("Alice", Money::new(100.0))]);
        tracker
            .record_personal("Alice", Money::new(30.0), "Lunch")
            .unwrap();

        let report = format_full_report(&tracker, "€");
        assert!(report.contains("Alice's: Lunch - €30"));
        assert!(report.contains("Ledger total: €30.00"));
        assert!(report.contains("€70.00"));
    }
}
