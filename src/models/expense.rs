//! Expense model
//!
//! An expense is either personal (attributed to one owner) or shared by a group
//! of users. The variant is fixed at construction; share and description are
//! answered by the variant rather than by inspecting the type at call sites.

use std::fmt;

use super::money::Money;
use crate::error::{TrackerError, TrackerResult};

/// Persisted kind tag for an expense record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseKind {
    /// Personal expense with a single owner
    Personal,
    /// Expense shared equally among participants
    Group,
}

impl ExpenseKind {
    /// Tag written to the first column of `expenses.csv`
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Personal => "Expense",
            Self::Group => "GroupExpense",
        }
    }

    /// Parse a persisted kind tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "Expense" => Some(Self::Personal),
            "GroupExpense" => Some(Self::Group),
            _ => None,
        }
    }
}

/// An expense attributed to a single user
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalExpense {
    amount: Money,
    description: String,
    owner: Option<String>,
}

impl PersonalExpense {
    /// Create a personal expense with no owner assigned yet
    pub fn new(amount: Money, description: impl Into<String>) -> TrackerResult<Self> {
        validate_amount(amount)?;
        Ok(Self {
            amount,
            description: description.into(),
            owner: None,
        })
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }
}

/// An expense whose cost is split equally among its participants
#[derive(Debug, Clone, PartialEq)]
pub struct GroupExpense {
    amount: Money,
    description: String,
    participants: Vec<String>,
}

impl GroupExpense {
    /// Create a group expense
    ///
    /// Participants are a set: repeated names collapse onto their first
    /// occurrence, keeping the given order.
    pub fn new(
        amount: Money,
        description: impl Into<String>,
        participants: Vec<String>,
    ) -> TrackerResult<Self> {
        validate_amount(amount)?;

        let mut unique: Vec<String> = Vec::with_capacity(participants.len());
        for name in participants {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }

        if unique.is_empty() {
            return Err(TrackerError::InvalidArgument(
                "group expense needs at least one participant".into(),
            ));
        }

        Ok(Self {
            amount,
            description: description.into(),
            participants: unique,
        })
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    /// Amount divided by the participant count, without rounding
    pub fn share(&self) -> Money {
        self.amount / self.participants.len()
    }
}

/// An expense recorded in the ledger
#[derive(Debug, Clone, PartialEq)]
pub enum Expense {
    Personal(PersonalExpense),
    Group(GroupExpense),
}

impl Expense {
    /// Shortcut for an ownerless personal expense
    pub fn personal(amount: Money, description: impl Into<String>) -> TrackerResult<Self> {
        PersonalExpense::new(amount, description).map(Self::Personal)
    }

    /// Shortcut for a group expense
    pub fn group(
        amount: Money,
        description: impl Into<String>,
        participants: Vec<String>,
    ) -> TrackerResult<Self> {
        GroupExpense::new(amount, description, participants).map(Self::Group)
    }

    pub fn kind(&self) -> ExpenseKind {
        match self {
            Self::Personal(_) => ExpenseKind::Personal,
            Self::Group(_) => ExpenseKind::Group,
        }
    }

    /// Full amount of the expense
    pub fn amount(&self) -> Money {
        match self {
            Self::Personal(e) => e.amount,
            Self::Group(e) => e.amount,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Personal(e) => &e.description,
            Self::Group(e) => &e.description,
        }
    }

    /// Owner of a personal expense; always `None` for group expenses
    pub fn owner(&self) -> Option<&str> {
        match self {
            Self::Personal(e) => e.owner(),
            Self::Group(_) => None,
        }
    }

    /// Portion of the amount attributed to each involved user
    pub fn effective_share(&self) -> Money {
        match self {
            Self::Personal(e) => e.amount,
            Self::Group(e) => e.share(),
        }
    }

    /// Names of the users this expense counts against
    pub fn involved_users(&self) -> Vec<&str> {
        match self {
            Self::Personal(e) => e.owner().into_iter().collect(),
            Self::Group(e) => e.participants.iter().map(String::as_str).collect(),
        }
    }

    /// Assign the owner of a personal expense
    ///
    /// Group expenses have no owner; asking for one is an error.
    pub fn set_owner(&mut self, owner: impl Into<String>) -> TrackerResult<()> {
        match self {
            Self::Personal(e) => {
                e.owner = Some(owner.into());
                Ok(())
            }
            Self::Group(_) => Err(TrackerError::InvalidArgument(
                "group expenses are shared and cannot have an owner".into(),
            )),
        }
    }

    /// Builder-style owner assignment
    pub fn with_owner(mut self, owner: impl Into<String>) -> TrackerResult<Self> {
        self.set_owner(owner)?;
        Ok(self)
    }

    /// One-line description, e.g. `Lunch - €30` or `Group (Alice, Bob): Dinner - €40`
    pub fn describe(&self) -> String {
        match self {
            Self::Personal(e) => format!("{} - {}", e.description, e.amount),
            Self::Group(e) => format!(
                "Group ({}): {} - {}",
                e.participants.join(", "),
                e.description,
                e.amount
            ),
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

fn validate_amount(amount: Money) -> TrackerResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(TrackerError::InvalidArgument(format!(
            "amount must be a positive number, got {}",
            amount.value()
        )))
    }
}
