//! Business logic helpers for recording cash received.

use chrono::Utc;

use crate::{
    config::Config,
    errors::{LedgerError, Result},
    ledger::{date::format_record_timestamp, Document, Transaction},
};

use super::{require_text, resolve_amount, resolve_date, resolve_department};

pub struct TransactionService;

impl TransactionService {
    /// Builds a cash transaction, optionally linked to a pledge.
    ///
    /// `date` defaults to now. `pledge_ref` accepts a full pledge id or a unique
    /// id suffix as shown in listings.
    pub fn record_cash(
        config: &Config,
        doc: &Document,
        name: &str,
        department: &str,
        amount: &str,
        date: Option<&str>,
        pledge_ref: Option<&str>,
    ) -> Result<Transaction> {
        let name = require_text("name", name)?;
        let department = resolve_department(config, department)?;
        let amount = resolve_amount(amount)?;
        let date = match date {
            Some(raw) => resolve_date(raw)?,
            None => format_record_timestamp(Utc::now()),
        };
        let mut txn = Transaction::new(name, department, amount, date);
        if let Some(reference) = pledge_ref {
            let pledge = doc
                .find_pledge(reference)
                .map_err(|err| LedgerError::InvalidInput(err.to_string()))?;
            txn = txn.for_pledge(pledge.id.clone());
        }
        Ok(txn)
    }

    /// Transactions linked to `pledge_id`, in recorded order.
    pub fn payments_for<'a>(doc: &'a Document, pledge_id: &str) -> Vec<&'a Transaction> {
        doc.transactions
            .iter()
            .filter(|txn| {
                txn.pledge_id
                    .as_ref()
                    .map(|id| id.as_str() == pledge_id)
                    .unwrap_or(false)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{date::parse_record_date, Pledge};

    fn doc_with_pledge() -> Document {
        Document {
            pledges: vec![Pledge::new("Ann", "Eagles", 100.0).with_id("0f9e8d7c")],
            ..Document::default()
        }
    }

    #[test]
    fn record_cash_links_pledge_by_suffix() {
        let doc = doc_with_pledge();
        let txn = TransactionService::record_cash(
            &Config::default(),
            &doc,
            "Ann",
            "Eagles",
            "40",
            Some("2024-05-01"),
            Some("8d7c"),
        )
        .unwrap();
        assert_eq!(txn.pledge_id.as_ref().unwrap().as_str(), "0f9e8d7c");
        assert_eq!(txn.date, "2024-05-01T00:00:00.000Z");
    }

    #[test]
    fn record_cash_defaults_date_to_now() {
        let txn = TransactionService::record_cash(
            &Config::default(),
            &Document::default(),
            "Walk-in",
            "Guests",
            "5",
            None,
            None,
        )
        .unwrap();
        assert!(parse_record_date(&txn.date).is_some());
        assert!(txn.is_general_donation());
    }

    #[test]
    fn unknown_pledge_reference_is_invalid_input() {
        let err = TransactionService::record_cash(
            &Config::default(),
            &doc_with_pledge(),
            "Ann",
            "Eagles",
            "40",
            None,
            Some("nope"),
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
    }

    #[test]
    fn payments_for_filters_by_pledge() {
        let mut doc = doc_with_pledge();
        doc.transactions.push(
            Transaction::new("Ann", "Eagles", 10.0, "2024-01-01")
                .with_id("t1")
                .for_pledge("0f9e8d7c"),
        );
        doc.transactions
            .push(Transaction::new("Bob", "Youth", 10.0, "2024-01-01").with_id("t2"));
        let payments = TransactionService::payments_for(&doc, "0f9e8d7c");
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].id.as_str(), "t1");
    }
}
