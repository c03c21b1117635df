use chrono::Utc;

use crate::{
    errors::Result,
    ledger::{date::format_record_timestamp, Expense},
};

use super::{require_text, resolve_amount, resolve_date};

pub struct ExpenseService;

impl ExpenseService {
    pub fn create(description: &str, amount: &str, date: Option<&str>) -> Result<Expense> {
        let description = require_text("description", description)?;
        let amount = resolve_amount(amount)?;
        let date = match date {
            Some(raw) => resolve_date(raw)?,
            None => format_record_timestamp(Utc::now()),
        };
        Ok(Expense::new(description, amount, date))
    }
}
