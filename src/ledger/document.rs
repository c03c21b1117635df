use serde::{Deserialize, Serialize};

use super::{Expense, Pledge, RecordId, Transaction};

/// The full persisted state: pledges, cash transactions and expenses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub pledges: Vec<Pledge>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

/// Names the three record collections of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Pledges,
    Transactions,
    Expenses,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Pledges => "pledges",
            Collection::Transactions => "transactions",
            Collection::Expenses => "expenses",
        }
    }
}

/// One record destined for a specific collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Pledge(Pledge),
    Transaction(Transaction),
    Expense(Expense),
}

impl Record {
    pub fn collection(&self) -> Collection {
        match self {
            Record::Pledge(_) => Collection::Pledges,
            Record::Transaction(_) => Collection::Transactions,
            Record::Expense(_) => Collection::Expenses,
        }
    }

    pub fn id(&self) -> &RecordId {
        match self {
            Record::Pledge(pledge) => &pledge.id,
            Record::Transaction(txn) => &txn.id,
            Record::Expense(expense) => &expense.id,
        }
    }

    pub(crate) fn set_id(&mut self, id: RecordId) {
        match self {
            Record::Pledge(pledge) => pledge.id = id,
            Record::Transaction(txn) => txn.id = id,
            Record::Expense(expense) => expense.id = id,
        }
    }
}

impl From<Pledge> for Record {
    fn from(value: Pledge) -> Self {
        Record::Pledge(value)
    }
}

impl From<Transaction> for Record {
    fn from(value: Transaction) -> Self {
        Record::Transaction(value)
    }
}

impl From<Expense> for Record {
    fn from(value: Expense) -> Self {
        Record::Expense(value)
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pledges.is_empty() && self.transactions.is_empty() && self.expenses.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.pledges.len() + self.transactions.len() + self.expenses.len()
    }

    pub fn pledge(&self, id: &RecordId) -> Option<&Pledge> {
        self.pledges.iter().find(|pledge| &pledge.id == id)
    }

    pub fn contains_id(&self, collection: Collection, id: &RecordId) -> bool {
        match collection {
            Collection::Pledges => self.pledges.iter().any(|p| &p.id == id),
            Collection::Transactions => self.transactions.iter().any(|t| &t.id == id),
            Collection::Expenses => self.expenses.iter().any(|e| &e.id == id),
        }
    }

    /// Resolves a pledge by full id, or by an id suffix shared by exactly one pledge.
    pub fn find_pledge(&self, reference: &str) -> Result<&Pledge, PledgeLookupError> {
        let needle = reference.trim();
        if needle.is_empty() {
            return Err(PledgeLookupError::NotFound(reference.to_string()));
        }
        if let Some(exact) = self.pledges.iter().find(|p| p.id.as_str() == needle) {
            return Ok(exact);
        }
        let mut matches = self
            .pledges
            .iter()
            .filter(|p| p.id.as_str().ends_with(needle));
        match (matches.next(), matches.next()) {
            (Some(found), None) => Ok(found),
            (Some(_), Some(_)) => Err(PledgeLookupError::Ambiguous(needle.to_string())),
            (None, _) => Err(PledgeLookupError::NotFound(needle.to_string())),
        }
    }

    pub(crate) fn push(&mut self, record: Record) {
        match record {
            Record::Pledge(pledge) => self.pledges.push(pledge),
            Record::Transaction(txn) => self.transactions.push(txn),
            Record::Expense(expense) => self.expenses.push(expense),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PledgeLookupError {
    #[error("no pledge matches `{0}`")]
    NotFound(String),
    #[error("more than one pledge matches `{0}`")]
    Ambiguous(String),
}
