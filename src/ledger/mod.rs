//! Fundraising records, the persisted document, and serialization helpers.

pub mod amount;
pub mod date;
pub mod document;
pub mod expense;
pub mod pledge;
pub mod record_id;
pub mod transaction;

pub use document::{Collection, Document, PledgeLookupError, Record};
pub use expense::Expense;
pub use pledge::Pledge;
pub use record_id::RecordId;
pub use transaction::Transaction;
