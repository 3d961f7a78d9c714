#![doc(test(attr(deny(warnings))))]

//! DealVault Core tracks lifetime-deal purchases, categorized expenses and
//! monthly budget limits, and derives the totals, breakdowns and calendar
//! views a presentation layer renders.
//!
//! ```
//! use dealvault_core::{core::services::SummaryService, store::Store};
//!
//! let store = Store::seeded(std::sync::Arc::new(dealvault_core::core::time::SystemClock)).unwrap();
//! let stats = SummaryService::dashboard(&store, 3);
//! assert_eq!(stats.recent.len(), 3);
//! ```

pub mod aggregate;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod query;
pub mod storage;
pub mod store;
pub mod utils;

pub use errors::{DealVaultError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("DealVault core tracing initialized.");
    });
}
