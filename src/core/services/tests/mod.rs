mod budget_service_tests;
mod summary_service_tests;

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};

use crate::core::time::ManualClock;
use crate::store::Store;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Empty store whose clock reads 2024-01-20 09:00 UTC.
pub(super) fn empty_store() -> (Store, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 1, 20, 9, 0, 0).unwrap(),
    ));
    (Store::new(clock.clone()), clock)
}

pub(super) fn seeded_store() -> Store {
    let (_, clock) = empty_store();
    Store::seeded(clock).expect("seed parses")
}
