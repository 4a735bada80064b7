use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn spendcap(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("spendcap").unwrap();
    cmd.arg("--data-dir").arg(dir).env_remove("RUST_LOG");
    cmd
}

fn add_user(dir: &Path, name: &str, limit: &str) {
    spendcap(dir)
        .args(["user", "add", name, limit])
        .assert()
        .success();
}

#[test]
fn test_personal_expense_is_persisted() {
    let temp_dir = TempDir::new().unwrap();
    add_user(temp_dir.path(), "Alice", "100");

    spendcap(temp_dir.path())
        .args(["expense", "add", "Alice", "30", "Lunch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense added: Lunch - €30"));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("users.csv")).unwrap(),
        "Alice,100\n"
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("expenses.csv")).unwrap(),
        "Expense,30,Lunch,Alice\n"
    );
}

#[test]
fn test_limit_exceeded_fails_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    add_user(temp_dir.path(), "Alice", "100");

    spendcap(temp_dir.path())
        .args(["expense", "add", "Alice", "150", "Laptop"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Alice has exceeded their spending limit"));

    let expenses = fs::read_to_string(temp_dir.path().join("expenses.csv")).unwrap();
    assert!(expenses.is_empty());
}

#[test]
fn test_group_expense_split_and_reported() {
    let temp_dir = TempDir::new().unwrap();
    add_user(temp_dir.path(), "Alice", "100");
    add_user(temp_dir.path(), "Bob", "50");

    spendcap(temp_dir.path())
        .args(["expense", "add", "Alice", "40", "Dinner", "--group", "Bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Share per user: €20"));

    spendcap(temp_dir.path())
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("Group (Alice, Bob): Dinner - €40"))
        .stdout(predicate::str::contains("Ledger total: €40.00"));
}

#[test]
fn test_group_over_one_limit_touches_nobody() {
    let temp_dir = TempDir::new().unwrap();
    add_user(temp_dir.path(), "Bob", "50");
    add_user(temp_dir.path(), "Charlie", "10");

    spendcap(temp_dir.path())
        .args(["expense", "add", "Bob", "100", "Trip", "--group", "Charlie"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Charlie"));

    spendcap(temp_dir.path())
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout("No expenses to show.\n");
}

#[test]
fn test_duplicate_user_fails() {
    let temp_dir = TempDir::new().unwrap();
    add_user(temp_dir.path(), "Alice", "100");

    spendcap(temp_dir.path())
        .args(["user", "add", "Alice", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User already exists: Alice"));
}

#[test]
fn test_change_limit() {
    let temp_dir = TempDir::new().unwrap();
    add_user(temp_dir.path(), "Alice", "100");

    spendcap(temp_dir.path())
        .args(["user", "limit", "Alice", "250.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice's limit updated to €250.5"));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("users.csv")).unwrap(),
        "Alice,250.5\n"
    );
}

#[test]
fn test_interactive_menu() {
    let temp_dir = TempDir::new().unwrap();

    spendcap(temp_dir.path())
        .write_stdin("3\nAlice\n100\n1\nAlice\npersonal\n30\nLunch\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("User Alice added successfully."))
        .stdout(predicate::str::contains("Expense added!"))
        .stdout(predicate::str::contains("Alice: €100"))
        .stdout(predicate::str::contains("Alice's: Lunch - €30"));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("expenses.csv")).unwrap(),
        "Expense,30,Lunch,Alice\n"
    );
}

#[test]
fn test_config_shows_paths() {
    let temp_dir = TempDir::new().unwrap();

    spendcap(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("users.csv"))
        .stdout(predicate::str::contains("Initialized:    no"))
        .stdout(predicate::str::contains("Currency symbol: €"));

    add_user(temp_dir.path(), "Alice", "100");
    spendcap(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized:    yes"));
}
