pub mod expense_service;
pub mod import_service;
pub mod pledge_service;
pub mod summary_service;
pub mod transaction_service;

pub use expense_service::ExpenseService;
pub use import_service::{BackupInfo, CsvImport, CsvImportReport, ImportService};
pub use pledge_service::PledgeService;
pub use summary_service::{
    DashboardTotals, DepartmentTotal, EntryKind, FulfillmentStatus, LedgerEntry, PledgeProgress,
    SummaryService,
};
pub use transaction_service::TransactionService;

use crate::{
    config::Config,
    errors::{LedgerError, Result},
    ledger::{amount::parse_amount, date::normalize_record_date},
};

fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn resolve_amount(raw: &str) -> Result<f64> {
    parse_amount(raw)
        .ok_or_else(|| LedgerError::InvalidInput(format!("`{}` is not a valid amount", raw.trim())))
}

fn resolve_department(config: &Config, raw: &str) -> Result<String> {
    config
        .canonical_department(raw)
        .map(str::to_string)
        .ok_or_else(|| {
            LedgerError::InvalidInput(format!(
                "unknown department `{}` (expected one of: {})",
                raw.trim(),
                config.departments.join(", ")
            ))
        })
}

fn resolve_date(raw: &str) -> Result<String> {
    normalize_record_date(raw)
        .ok_or_else(|| LedgerError::InvalidInput(format!("`{}` is not a valid date", raw.trim())))
}
