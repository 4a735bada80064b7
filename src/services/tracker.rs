//! Finance tracker service
//!
//! Owns the user registry and the global ledger. Users and the ledger share
//! the same `Rc<Expense>` values, so a total seen through a user and one seen
//! through the ledger always agree.
//!
//! Limits are enforced per user when an expense is added. A group expense
//! touches several users, so `commit_expense` checks every involved user
//! first and only then records the expense anywhere.

use std::path::Path;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    validate_limit, validate_user_name, Expense, ExpenseFactory, ExpenseKind, Money, User,
};
use crate::storage::expenses::{read_expense_records, write_expense_records, ExpenseRecord};
use crate::storage::users::write_users;

/// Line reported when the ledger is empty
pub const NO_EXPENSES: &str = "No expenses to show.";

/// A user who would go over their limit if an expense were committed
#[derive(Debug, Clone, PartialEq)]
pub struct LimitBreach {
    pub user: String,
    pub share: Money,
    pub total: Money,
    pub limit: Money,
}

impl From<LimitBreach> for TrackerError {
    fn from(breach: LimitBreach) -> Self {
        TrackerError::LimitExceeded {
            user: breach.user,
            share: breach.share,
            total: breach.total,
            limit: breach.limit,
        }
    }
}

/// Per-user spending report row
#[derive(Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub name: String,
    pub limit: Money,
    pub spent: Money,
    pub remaining: Money,
    pub exceeded: bool,
    pub expense_count: usize,
}

/// Aggregates users and every recorded expense
#[derive(Debug, Default)]
pub struct FinanceTracker {
    users: Vec<User>,
    expenses: Vec<Rc<Expense>>,
    factory: ExpenseFactory,
}

impl FinanceTracker {
    /// Create a tracker over the given users with an empty ledger
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users,
            expenses: Vec::new(),
            factory: ExpenseFactory::new(),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The global ledger, in insertion order
    pub fn expenses(&self) -> &[Rc<Expense>] {
        &self.expenses
    }

    pub fn factory(&self) -> &ExpenseFactory {
        &self.factory
    }

    /// First user with exactly this name
    pub fn find_user(&self, name: &str) -> Option<&User> {
        self.users.iter().find(|u| u.name == name)
    }

    pub fn find_user_mut(&mut self, name: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.name == name)
    }

    /// Register a new user
    pub fn add_user(&mut self, name: &str, limit: Money) -> TrackerResult<&User> {
        let name = name.trim();
        validate_user_name(name)?;
        validate_limit(limit)?;

        if self.find_user(name).is_some() {
            return Err(TrackerError::duplicate_user(name));
        }

        debug!(user = name, limit = limit.value(), "adding user");
        self.users.push(User::new(name, limit));
        let idx = self.users.len() - 1;
        Ok(&self.users[idx])
    }

    /// Change a user's limit
    ///
    /// Lowering a limit below the current total is allowed; it only affects
    /// later additions and `has_exceeded_limit`.
    pub fn set_limit(&mut self, name: &str, limit: Money) -> TrackerResult<()> {
        validate_limit(limit)?;
        let user = self
            .find_user_mut(name)
            .ok_or_else(|| TrackerError::user_not_found(name))?;

        debug!(user = name, limit = limit.value(), "changing limit");
        user.set_limit(limit);
        Ok(())
    }

    /// Append to the ledger without any limit check
    pub fn add_expense(&mut self, expense: Rc<Expense>) {
        self.expenses.push(expense);
    }

    /// Check an expense against every involved user's limit
    ///
    /// Returns the users who would be pushed over their limit; an empty list
    /// means the expense can be committed. Fails with `NotFound` if an
    /// involved user is unknown.
    pub fn check_limits(&self, expense: &Expense) -> TrackerResult<Vec<LimitBreach>> {
        let share = expense.effective_share();
        let mut breaches = Vec::new();

        for name in expense.involved_users() {
            let user = self
                .find_user(name)
                .ok_or_else(|| TrackerError::user_not_found(name))?;

            if user.would_exceed(share) {
                breaches.push(LimitBreach {
                    user: user.name.clone(),
                    share,
                    total: user.total_expenses(),
                    limit: user.limit,
                });
            }
        }

        Ok(breaches)
    }

    /// Record an expense against all involved users and the ledger
    ///
    /// All involved users are checked before anything is recorded, so a
    /// rejected group expense leaves every user and the ledger unchanged.
    pub fn commit_expense(&mut self, expense: Expense) -> TrackerResult<Rc<Expense>> {
        if expense.involved_users().is_empty() {
            return Err(TrackerError::InvalidArgument(
                "personal expense has no owner".into(),
            ));
        }

        if let Some(breach) = self.check_limits(&expense)?.into_iter().next() {
            debug!(user = %breach.user, "rejecting expense over limit");
            return Err(breach.into());
        }

        let expense = Rc::new(expense);
        for name in expense.involved_users() {
            let user = self
                .find_user_mut(name)
                .ok_or_else(|| TrackerError::user_not_found(name))?;
            user.add_expense(Rc::clone(&expense))?;
        }

        debug!(expense = %expense, "committed expense");
        self.add_expense(Rc::clone(&expense));
        Ok(expense)
    }

    /// Build a personal expense for `owner` and commit it
    pub fn record_personal(
        &mut self,
        owner: &str,
        amount: Money,
        description: &str,
    ) -> TrackerResult<Rc<Expense>> {
        if self.find_user(owner).is_none() {
            return Err(TrackerError::user_not_found(owner));
        }

        let expense = self
            .factory
            .create("personal", amount, description, None)?
            .with_owner(owner)?;
        self.commit_expense(expense)
    }

    /// Build a group expense and commit it for every participant
    pub fn record_group(
        &mut self,
        amount: Money,
        description: &str,
        participants: Vec<String>,
    ) -> TrackerResult<Rc<Expense>> {
        let expense = self
            .factory
            .create("group", amount, description, Some(participants))?;
        self.commit_expense(expense)
    }

    /// Formatted ledger lines, produced lazily
    ///
    /// Yields the single line `No expenses to show.` when the ledger is empty.
    pub fn print_expenses(&self) -> impl Iterator<Item = String> + '_ {
        let empty = self.expenses.is_empty();
        std::iter::once(NO_EXPENSES.to_string())
            .filter(move |_| empty)
            .chain(self.expenses.iter().map(|e| ledger_line(e)))
    }

    /// Sum of the full amounts of every ledger entry
    pub fn ledger_total(&self) -> Money {
        self.expenses.iter().map(|e| e.amount()).sum()
    }

    /// Spending report for every user, in registry order
    pub fn user_summaries(&self) -> Vec<UserSummary> {
        self.users
            .iter()
            .map(|u| {
                let spent = u.total_expenses();
                UserSummary {
                    name: u.name.clone(),
                    limit: u.limit,
                    spent,
                    remaining: u.limit - spent,
                    exceeded: spent > u.limit,
                    expense_count: u.expenses().len(),
                }
            })
            .collect()
    }

    /// Overwrite `path` with the whole ledger
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> TrackerResult<()> {
        let path = path.as_ref();
        write_expense_records(
            path,
            self.expenses.iter().map(|e| ExpenseRecord::from(e.as_ref())),
        )?;
        info!(path = %path.display(), count = self.expenses.len(), "saved expenses");
        Ok(())
    }

    /// Overwrite `path` with the user registry
    pub fn save_users<P: AsRef<Path>>(&self, path: P) -> TrackerResult<()> {
        let path = path.as_ref();
        write_users(path, &self.users)?;
        info!(path = %path.display(), count = self.users.len(), "saved users");
        Ok(())
    }

    /// Replace the ledger with the contents of `path`
    ///
    /// The ledger and every user's expense list are cleared first. Names that
    /// don't match a known user are dropped; a group left without
    /// participants, or a personal expense whose owner is unknown, is skipped.
    /// Loaded expenses are trusted and not checked against limits. A missing
    /// file leaves the ledger empty.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> TrackerResult<()> {
        self.expenses.clear();
        for user in &mut self.users {
            user.clear_expenses();
        }

        for record in read_expense_records(path.as_ref())? {
            let Some(expense) = self.rebuild(record) else {
                continue;
            };

            let expense = Rc::new(expense);
            for name in expense.involved_users() {
                if let Some(user) = self.find_user_mut(name) {
                    user.push_trusted(Rc::clone(&expense));
                }
            }
            self.expenses.push(expense);
        }

        debug!(count = self.expenses.len(), "loaded expenses");
        Ok(())
    }

    /// Turn a decoded record back into an expense, resolving user names
    fn rebuild(&self, record: ExpenseRecord) -> Option<Expense> {
        let (known, unknown): (Vec<String>, Vec<String>) = record
            .parties
            .into_iter()
            .partition(|name| self.find_user(name).is_some());

        for name in &unknown {
            warn!(user = %name, description = %record.description, "dropping unknown user");
        }

        let built = match record.kind {
            ExpenseKind::Group => {
                if known.is_empty() {
                    warn!(description = %record.description, "skipping group expense without known participants");
                    return None;
                }
                Expense::group(record.amount, record.description, known)
            }
            ExpenseKind::Personal => {
                let [owner] = <[String; 1]>::try_from(known).ok()?;
                if !unknown.is_empty() {
                    return None;
                }
                Expense::personal(record.amount, record.description)
                    .and_then(|e| e.with_owner(owner))
            }
        };

        match built {
            Ok(expense) => Some(expense),
            Err(err) => {
                warn!(%err, "skipping invalid expense record");
                None
            }
        }
    }
}

/// Format one ledger entry for display
///
/// Personal: `Alice's: Lunch - €30` (or `Personal: ...` without an owner).
/// Group: the expense's own `Group (...)` description.
pub fn ledger_line(expense: &Expense) -> String {
    match expense {
        Expense::Group(_) => expense.describe(),
        Expense::Personal(p) => match p.owner() {
            Some(owner) => format!("{}'s: {}", owner, expense.describe()),
            None => format!("Personal: {}", expense.describe()),
        },
    }
}
