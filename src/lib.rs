#![doc(test(attr(deny(warnings))))]

//! MoneyWise Core aggregates dated financial records into reporting periods
//! and keeps bill reminders scheduled with an external trigger notifier.

pub mod config;
pub mod errors;
pub mod ledger;
pub mod reminders;
pub mod reports;
pub mod utils;

use std::sync::Once;

pub use errors::{CoreError, CoreResult, NotifierError};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        let build = utils::build_info::current();
        tracing::info!(build = %build.summary(), "MoneyWise Core tracing initialized.");
    });
}
