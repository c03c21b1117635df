//! Read-only aggregation over a [`Document`]. Every call recomputes from scratch.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ledger::{date::ledger_sort_key, Document, Pledge, RecordId};

/// Dashboard figures: cash collected, money spent and the difference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardTotals {
    pub revenue: f64,
    pub expenses: f64,
    pub net: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FulfillmentStatus {
    Fulfilled,
    Pending,
}

impl fmt::Display for FulfillmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FulfillmentStatus::Fulfilled => f.write_str("fulfilled"),
            FulfillmentStatus::Pending => f.write_str("pending"),
        }
    }
}

/// One row of the pledge-fulfillment table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PledgeProgress {
    pub id: RecordId,
    pub name: String,
    pub department: String,
    pub pledged: f64,
    pub paid: f64,
    pub balance: f64,
    pub status: FulfillmentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentTotal {
    pub department: String,
    pub collected: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    Income,
    Expense,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Income => f.write_str("Income"),
            EntryKind::Expense => f.write_str("Expense"),
        }
    }
}

/// A transaction or expense as shown in the combined ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub id: RecordId,
    pub date: String,
    pub name: String,
    pub kind: EntryKind,
    pub amount: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn total_revenue(doc: &Document) -> f64 {
        doc.transactions.iter().map(|txn| txn.amount).sum()
    }

    pub fn total_expenses(doc: &Document) -> f64 {
        doc.expenses.iter().map(|expense| expense.amount).sum()
    }

    pub fn net_balance(doc: &Document) -> f64 {
        Self::total_revenue(doc) - Self::total_expenses(doc)
    }

    pub fn dashboard(doc: &Document) -> DashboardTotals {
        let revenue = Self::total_revenue(doc);
        let expenses = Self::total_expenses(doc);
        DashboardTotals {
            revenue,
            expenses,
            net: revenue - expenses,
        }
    }

    pub fn amount_paid_for_pledge(doc: &Document, pledge_id: &RecordId) -> f64 {
        doc.transactions
            .iter()
            .filter(|txn| txn.pledge_id.as_ref() == Some(pledge_id))
            .map(|txn| txn.amount)
            .sum()
    }

    /// Outstanding amount; negative when the pledge is overpaid.
    pub fn pledge_balance(doc: &Document, pledge: &Pledge) -> f64 {
        pledge.amount - Self::amount_paid_for_pledge(doc, &pledge.id)
    }

    pub fn pledge_status(doc: &Document, pledge: &Pledge) -> FulfillmentStatus {
        status_for(pledge.amount, Self::amount_paid_for_pledge(doc, &pledge.id))
    }

    pub fn pledge_progress(doc: &Document) -> Vec<PledgeProgress> {
        doc.pledges
            .iter()
            .map(|pledge| {
                let paid = Self::amount_paid_for_pledge(doc, &pledge.id);
                PledgeProgress {
                    id: pledge.id.clone(),
                    name: pledge.name.clone(),
                    department: pledge.department.clone(),
                    pledged: pledge.amount,
                    paid,
                    balance: pledge.amount - paid,
                    status: status_for(pledge.amount, paid),
                }
            })
            .collect()
    }

    pub fn department_total(doc: &Document, department: &str) -> f64 {
        doc.transactions
            .iter()
            .filter(|txn| txn.department == department)
            .map(|txn| txn.amount)
            .sum()
    }

    /// Totals for each configured department, in configured order.
    pub fn department_totals<S: AsRef<str>>(
        doc: &Document,
        departments: &[S],
    ) -> Vec<DepartmentTotal> {
        departments
            .iter()
            .map(|dept| DepartmentTotal {
                department: dept.as_ref().to_string(),
                collected: Self::department_total(doc, dept.as_ref()),
            })
            .collect()
    }

    /// Transactions then expenses, stably sorted newest first.
    pub fn unified_ledger(doc: &Document) -> Vec<LedgerEntry> {
        let income = doc.transactions.iter().map(|txn| LedgerEntry {
            id: txn.id.clone(),
            date: txn.date.clone(),
            name: txn.name.clone(),
            kind: EntryKind::Income,
            amount: txn.amount,
        });
        let spending = doc.expenses.iter().map(|expense| LedgerEntry {
            id: expense.id.clone(),
            date: expense.date.clone(),
            name: expense.description.clone(),
            kind: EntryKind::Expense,
            amount: expense.amount,
        });
        let mut keyed: Vec<(DateTime<Utc>, LedgerEntry)> = income
            .chain(spending)
            .map(|entry| (ledger_sort_key(&entry.date), entry))
            .collect();
        keyed.sort_by(|a, b| b.0.cmp(&a.0));
        keyed.into_iter().map(|(_, entry)| entry).collect()
    }
}

fn status_for(pledged: f64, paid: f64) -> FulfillmentStatus {
    if paid >= pledged {
        FulfillmentStatus::Fulfilled
    } else {
        FulfillmentStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Expense, Transaction};

    fn sample() -> Document {
        Document {
            pledges: vec![
                Pledge::new("Ann", "Eagles", 100.0).with_id("p1"),
                Pledge::new("Ben", "Youth", 0.0).with_id("p2"),
            ],
            transactions: vec![
                Transaction::new("Ann", "Eagles", 60.0, "2024-01-02").with_id("t1").for_pledge("p1"),
                Transaction::new("Ann", "Eagles", 90.0, "2024-01-03").with_id("t2").for_pledge("p1"),
                Transaction::new("Cara", "Youth", 25.5, "2024-01-01").with_id("t3"),
            ],
            expenses: vec![Expense::new("Tents", 40.0, "2024-01-02").with_id("e1")],
        }
    }

    #[test]
    fn dashboard_matches_component_totals() {
        let doc = sample();
        let totals = SummaryService::dashboard(&doc);
        assert_eq!(totals.revenue, 175.5);
        assert_eq!(totals.expenses, 40.0);
        assert_eq!(totals.net, SummaryService::net_balance(&doc));
    }

    #[test]
    fn overpaid_pledge_is_fulfilled_with_negative_balance() {
        let doc = sample();
        let pledge = &doc.pledges[0];
        assert_eq!(SummaryService::amount_paid_for_pledge(&doc, &pledge.id), 150.0);
        assert_eq!(SummaryService::pledge_balance(&doc, pledge), -50.0);
        assert_eq!(
            SummaryService::pledge_status(&doc, pledge),
            FulfillmentStatus::Fulfilled
        );
    }

    #[test]
    fn zero_amount_pledge_is_trivially_fulfilled() {
        let doc = sample();
        let progress = SummaryService::pledge_progress(&doc);
        assert_eq!(progress.len(), 2);
        assert_eq!(progress[1].paid, 0.0);
        assert_eq!(progress[1].status, FulfillmentStatus::Fulfilled);
    }

    #[test]
    fn departments_report_zero_when_empty() {
        let doc = sample();
        let totals = SummaryService::department_totals(&doc, &["Eagles", "Youth", "Guests"]);
        let collected: Vec<f64> = totals.iter().map(|t| t.collected).collect();
        assert_eq!(collected, vec![150.0, 25.5, 0.0]);
    }

    #[test]
    fn ledger_orders_newest_first_with_income_before_expense_on_ties() {
        let doc = sample();
        let ids: Vec<String> = SummaryService::unified_ledger(&doc)
            .into_iter()
            .map(|entry| entry.id.to_string())
            .collect();
        assert_eq!(ids, vec!["t2", "t1", "e1", "t3"]);
    }

    #[test]
    fn unparsable_dates_sink_to_the_bottom() {
        let doc = Document {
            transactions: vec![Transaction::new("X", "Youth", 1.0, "not a date").with_id("bad")],
            expenses: vec![Expense::new("Y", 1.0, "1999-12-31").with_id("old")],
            ..Document::default()
        };
        let ids: Vec<String> = SummaryService::unified_ledger(&doc)
            .into_iter()
            .map(|entry| entry.id.to_string())
            .collect();
        assert_eq!(ids, vec!["old", "bad"]);
    }
}
