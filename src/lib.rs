#![doc(test(attr(deny(warnings))))]

//! Fundraising Core records pledges, cash received and expenses for a small
//! organization, persists them in a single key-value slot, and derives the
//! dashboard, department, pledge-fulfillment and ledger views.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Fundraising Core tracing initialized.");
    });
}
