//! Interactive menu
//!
//! The text menu loop: add an expense, change a limit, add a user, exit.
//! Both CSV files are rewritten after every iteration. A bad answer is
//! reported and the loop carries on; end of input behaves like choosing exit.

use std::io::{BufRead, Write};

use tracing::error;

use crate::display::{format_expense_list, format_user_limits};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{ExpenseFactory, ExpenseKind, Money};
use crate::services::FinanceTracker;
use crate::storage::Storage;

/// What the loop does after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Run the menu until the user exits or input ends
pub fn run_menu<R: BufRead, W: Write>(
    storage: &Storage,
    tracker: &mut FinanceTracker,
    input: R,
    output: W,
) -> TrackerResult<()> {
    let mut menu = Menu {
        storage,
        tracker,
        input,
        output,
    };
    menu.run()
}

struct Menu<'a, R, W> {
    storage: &'a Storage,
    tracker: &'a mut FinanceTracker,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<'_, R, W> {
    fn run(&mut self) -> TrackerResult<()> {
        loop {
            writeln!(self.output, "\nAvailable options:")?;
            writeln!(self.output, "1. Add an expense")?;
            writeln!(self.output, "2. Change spending limit")?;
            writeln!(self.output, "3. Add a new user")?;
            writeln!(self.output, "4. Exit")?;

            let flow = match self.prompt("Choose an option (1, 2, 3, 4): ")? {
                None => Flow::Exit,
                Some(choice) => match choice.as_str() {
                    "1" => self.add_expense()?,
                    "2" => self.change_limit()?,
                    "3" => self.add_user()?,
                    "4" => Flow::Exit,
                    other => {
                        writeln!(self.output, "Invalid option: {}", other)?;
                        Flow::Continue
                    }
                },
            };

            self.save()?;

            if flow == Flow::Exit {
                break;
            }
        }

        writeln!(self.output, "\nCurrent Users and Their Spending Limits:")?;
        write!(self.output, "{}", format_user_limits(self.tracker.users()))?;
        writeln!(self.output, "\nAll Expenses:")?;
        write!(self.output, "{}", format_expense_list(&*self.tracker))?;
        self.output.flush()?;
        Ok(())
    }

    fn save(&mut self) -> TrackerResult<()> {
        if let Err(err) = self.storage.save_tracker(&*self.tracker) {
            error!(%err, "failed to save state");
            writeln!(self.output, "❌ Failed to save: {}", err)?;
        }
        Ok(())
    }

    /// Print a prompt and read one trimmed line; `None` at end of input
    ///
    /// Bytes that are not UTF-8 become replacement characters, so a garbled
    /// line is answered like any other unrecognised input.
    fn prompt(&mut self, message: &str) -> TrackerResult<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    /// Ask until a number is entered; `None` at end of input
    fn prompt_money(&mut self, message: &str) -> TrackerResult<Option<Money>> {
        loop {
            let Some(answer) = self.prompt(message)? else {
                return Ok(None);
            };
            match Money::parse(&answer) {
                Ok(amount) => return Ok(Some(amount)),
                Err(_) => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }

    /// Report a recoverable error without leaving the loop
    fn report(&mut self, err: &TrackerError) -> TrackerResult<()> {
        writeln!(self.output, "❌ {}", err)?;
        Ok(())
    }

    fn add_expense(&mut self) -> TrackerResult<Flow> {
        let Some(name) = self.prompt("Enter your name to add an expense: ")? else {
            return Ok(Flow::Exit);
        };
        if self.tracker.find_user(&name).is_none() {
            writeln!(self.output, "User {} does not exist.", name)?;
            return Ok(Flow::Continue);
        }

        let Some(kind) = self.prompt("Enter expense type ('personal' or 'group'): ")? else {
            return Ok(Flow::Exit);
        };
        let kind = match ExpenseFactory::parse_kind(&kind) {
            Ok(kind) => kind,
            Err(err) => {
                self.report(&err)?;
                return Ok(Flow::Continue);
            }
        };

        let Some(amount) = self.prompt_money("Enter amount: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(description) = self.prompt("Enter description: ")? else {
            return Ok(Flow::Exit);
        };

        match kind {
            ExpenseKind::Personal => self.add_personal(&name, amount, &description),
            ExpenseKind::Group => self.add_group(amount, &description),
        }
    }

    fn add_personal(&mut self, name: &str, amount: Money, description: &str) -> TrackerResult<Flow> {
        match self.tracker.record_personal(name, amount, description) {
            Ok(_) => writeln!(self.output, "Expense added!")?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn add_group(&mut self, amount: Money, description: &str) -> TrackerResult<Flow> {
        let Some(list) =
            self.prompt("Enter comma-separated user names (including yourself): ")?
        else {
            return Ok(Flow::Exit);
        };

        let names: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from)
            .collect();

        let missing: Vec<&str> = names
            .iter()
            .filter(|n| self.tracker.find_user(n).is_none())
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            writeln!(
                self.output,
                "Error: These users do not exist: {}",
                missing.join(", ")
            )?;
            return Ok(Flow::Continue);
        }

        // Participants follow registry order, not typing order
        let names: Vec<String> = self
            .tracker
            .users()
            .iter()
            .filter(|u| names.contains(&u.name))
            .map(|u| u.name.clone())
            .collect();

        let created = self
            .tracker
            .factory()
            .create("group", amount, description, Some(names));
        let expense = match created {
            Ok(expense) => expense,
            Err(err) => {
                self.report(&err)?;
                return Ok(Flow::Continue);
            }
        };

        let breaches = self.tracker.check_limits(&expense)?;
        if !breaches.is_empty() {
            let who: Vec<&str> = breaches.iter().map(|b| b.user.as_str()).collect();
            writeln!(
                self.output,
                "❌ These users would exceed their limit: {}",
                who.join(", ")
            )?;
            return Ok(Flow::Continue);
        }

        match self.tracker.commit_expense(expense) {
            Ok(_) => writeln!(self.output, "Expense added!")?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn change_limit(&mut self) -> TrackerResult<Flow> {
        let Some(name) = self.prompt("Enter your name: ")? else {
            return Ok(Flow::Exit);
        };
        if self.tracker.find_user(&name).is_none() {
            writeln!(self.output, "User {} not found.", name)?;
            return Ok(Flow::Continue);
        }

        let Some(limit) = self.prompt_money(&format!("Enter new limit for {}: ", name))? else {
            return Ok(Flow::Exit);
        };

        match self.tracker.set_limit(&name, limit) {
            Ok(()) => writeln!(self.output, "{}'s limit updated to {}", name, limit)?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn add_user(&mut self) -> TrackerResult<Flow> {
        let Some(name) = self.prompt("Enter new user's name: ")? else {
            return Ok(Flow::Exit);
        };
        if self.tracker.find_user(&name).is_some() {
            writeln!(self.output, "User {} already exists.", name)?;
            return Ok(Flow::Continue);
        }

        let Some(limit) =
            self.prompt_money(&format!("Enter spending limit for {}: ", name))?
        else {
            return Ok(Flow::Exit);
        };

        let added = self.tracker.add_user(&name, limit).map(|u| u.name.clone());
        match added {
            Ok(added) => writeln!(self.output, "User {} added successfully.", added)?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackerPaths;
    use crate::models::User;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    struct Session {
        _dir: TempDir,
        storage: Storage,
        tracker: FinanceTracker,
    }

    fn session() -> Session {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(TrackerPaths::with_base_dir(dir.path())).unwrap();
        let tracker = FinanceTracker::new(vec![
            User::new("Alice", Money::new(100.0)),
            User::new("Bob", Money::new(50.0)),
            User::new("Charlie", Money::new(10.0)),
        ]);
        Session {
            _dir: dir,
            storage,
            tracker,
        }
    }

    fn run(session: &mut Session, script: &str) -> String {
        let mut output = Vec::new();
        run_menu(
            &session.storage,
            &mut session.tracker,
            Cursor::new(script.as_bytes()),
            &mut output,
        )
        .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn total(session: &Session, name: &str) -> Money {
        session.tracker.find_user(name).unwrap().total_expenses()
    }

    #[test]
    fn test_add_personal_expense() {
        let mut session = session();
        let output = run(&mut session, "1\nAlice\npersonal\n30\nLunch\n4\n");

        assert!(output.contains("Expense added!"));
        assert_eq!(total(&session, "Alice"), Money::new(30.0));
        assert!(output.contains("Alice's: Lunch - €30"));
    }

    #[test]
    fn test_personal_over_limit_is_reported() {
        let mut session = session();
        let output = run(&mut session, "1\nAlice\npersonal\n150\nLaptop\n4\n");

        assert!(output.contains("❌ Alice has exceeded their spending limit"));
        assert_eq!(total(&session, "Alice"), Money::zero());
        assert!(output.contains("No expenses to show."));
    }

    #[test]
    fn test_group_precheck_blocks_every_participant() {
        let mut session = session();
        let output = run(
            &mut session,
            "1\nBob\ngroup\n100\nTrip\nBob, Charlie\n4\n",
        );

        assert!(output.contains("❌ These users would exceed their limit: Charlie"));
        assert_eq!(total(&session, "Bob"), Money::zero());
        assert_eq!(total(&session, "Charlie"), Money::zero());
        assert!(session.tracker.expenses().is_empty());
    }

    #[test]
    fn test_group_expense_added() {
        let mut session = session();
        let output = run(&mut session, "1\nAlice\ngroup\n40\nDinner\nAlice,Bob\n4\n");

        assert!(output.contains("Expense added!"));
        assert_eq!(total(&session, "Alice"), Money::new(20.0));
        assert_eq!(total(&session, "Bob"), Money::new(20.0));
        assert!(output.contains("Group (Alice, Bob): Dinner - €40"));
    }

    #[test]
    fn test_group_participants_follow_registry_order() {
        let mut session = session();
        let output = run(&mut session, "1\nBob\ngroup\n30\nCab\nCharlie, Alice,Bob\n4\n");

        assert!(output.contains("Group (Alice, Bob, Charlie): Cab - €30"));
        let expenses = fs::read_to_string(session.storage.paths().expenses_file()).unwrap();
        assert_eq!(expenses, "GroupExpense,30,Cab,Alice;Bob;Charlie\n");
    }

    #[test]
    fn test_group_with_unknown_names() {
        let mut session = session();
        let output = run(&mut session, "1\nAlice\ngroup\n40\nDinner\nAlice,Zed,Yan\n4\n");

        assert!(output.contains("Error: These users do not exist: Zed, Yan"));
        assert!(session.tracker.expenses().is_empty());
    }

    #[test]
    fn test_unknown_user_and_kind() {
        let mut session = session();
        let output = run(&mut session, "1\nMallory\n1\nAlice\nloan\n4\n");

        assert!(output.contains("User Mallory does not exist."));
        assert!(output.contains("unsupported expense kind"));
    }

    #[test]
    fn test_invalid_number_is_asked_again() {
        let mut session = session();
        let output = run(&mut session, "1\nAlice\npersonal\nabc\n12.5\nBook\n4\n");

        assert!(output.contains("Please enter a valid number."));
        assert_eq!(total(&session, "Alice"), Money::new(12.5));
    }

    #[test]
    fn test_change_limit() {
        let mut session = session();
        let output = run(&mut session, "2\nBob\n75\n2\nNobody\n4\n");

        assert!(output.contains("Bob's limit updated to €75"));
        assert!(output.contains("User Nobody not found."));
        assert_eq!(
            session.tracker.find_user("Bob").unwrap().limit,
            Money::new(75.0)
        );
    }

    #[test]
    fn test_add_user() {
        let mut session = session();
        let output = run(&mut session, "3\nDana\n20\n3\nAlice\n4\n");

        assert!(output.contains("User Dana added successfully."));
        assert!(output.contains("User Alice already exists."));
        assert!(output.contains("Dana: €20"));
        assert_eq!(session.tracker.users().len(), 4);
    }

    #[test]
    fn test_state_saved_after_each_iteration() {
        let mut session = session();
        run(&mut session, "3\nDana\n20\n1\nDana\npersonal\n5\nSnack\n4\n");

        let paths = session.storage.paths();
        let users = fs::read_to_string(paths.users_file()).unwrap();
        let expenses = fs::read_to_string(paths.expenses_file()).unwrap();
        assert!(users.ends_with("Dana,20\n"));
        assert_eq!(expenses, "Expense,5,Snack,Dana\n");
    }

    #[test]
    fn test_invalid_utf8_line_does_not_stop_the_menu() {
        let mut session = session();
        let mut script = b"1\n".to_vec();
        script.extend_from_slice(&[0xff, 0xfe, b'\n']);
        script.extend_from_slice(b"1\nAlice\npersonal\n30\nLunch\n4\n");

        let mut output = Vec::new();
        run_menu(
            &session.storage,
            &mut session.tracker,
            Cursor::new(script),
            &mut output,
        )
        .unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("User \u{fffd}\u{fffd} does not exist."));
        assert!(output.contains("Expense added!"));
        assert_eq!(session.tracker.expenses().len(), 1);
        assert_eq!(total(&session, "Alice"), Money::new(30.0));
    }

    #[test]
    fn test_end_of_input_exits_and_saves() {
        let mut session = session();
        let output = run(&mut session, "9\n");

        assert!(output.contains("Invalid option: 9"));
        assert!(output.contains("Current Users and Their Spending Limits:"));
        assert!(session.storage.paths().users_file().exists());
    }
}
