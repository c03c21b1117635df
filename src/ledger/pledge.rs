use serde::{Deserialize, Serialize};

use super::{amount::deserialize_amount, RecordId};

/// A recorded commitment to donate a specific amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pledge {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: f64,
}

impl Pledge {
    /// Builds a pledge without an id; the store assigns one on append.
    pub fn new(name: impl Into<String>, department: impl Into<String>, amount: f64) -> Self {
        Self {
            id: RecordId::blank(),
            name: name.into(),
            department: department.into(),
            amount,
        }
    }

    pub fn with_id(mut self, id: impl Into<RecordId>) -> Self {
        self.id = id.into();
        self
    }
}
