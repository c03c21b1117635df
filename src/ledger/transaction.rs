use serde::{Deserialize, Serialize};

use super::{amount::deserialize_amount, RecordId};

/// Cash actually received, optionally linked to a pledge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: f64,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pledge_id: Option<RecordId>,
}

impl Transaction {
    pub fn new(
        name: impl Into<String>,
        department: impl Into<String>,
        amount: f64,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::blank(),
            name: name.into(),
            department: department.into(),
            amount,
            date: date.into(),
            pledge_id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<RecordId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn for_pledge(mut self, pledge_id: impl Into<RecordId>) -> Self {
        self.pledge_id = Some(pledge_id.into());
        self
    }

    /// Transactions without a pledge link count as general donations.
    pub fn is_general_donation(&self) -> bool {
        self.pledge_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pledge_link_uses_camel_case_and_is_optional() {
        let linked = Transaction::new("Ann", "Youth", 50.0, "2024-01-01").for_pledge("p1");
        let json = serde_json::to_value(&linked).unwrap();
        assert_eq!(json["pledgeId"], "p1");

        let general = Transaction::new("Bob", "Youth", 10.0, "2024-01-01");
        let json = serde_json::to_value(&general).unwrap();
        assert!(json.get("pledgeId").is_none());
        assert!(general.is_general_donation());
    }

    #[test]
    fn reads_browser_records_with_numeric_ids() {
        let raw = r#"{"id":1704067200000,"name":"Ann","department":"Eagles","amount":500,"date":"2024-01-01T00:00:00.000Z","pledgeId":1703980800000.5}"#;
        let txn: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(txn.id.as_str(), "1704067200000");
        assert_eq!(txn.pledge_id.unwrap().as_str(), "1703980800000.5");
        assert_eq!(txn.amount, 500.0);
    }
}
