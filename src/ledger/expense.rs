use serde::{Deserialize, Serialize};

use super::{amount::deserialize_amount, RecordId};

/// An outflow of funds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: RecordId,
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: f64,
    #[serde(default)]
    pub date: String,
}

impl Expense {
    pub fn new(description: impl Into<String>, amount: f64, date: impl Into<String>) -> Self {
        Self {
            id: RecordId::blank(),
            description: description.into(),
            amount,
            date: date.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<RecordId>) -> Self {
        self.id = id.into();
        self
    }
}
