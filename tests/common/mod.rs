#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use dealvault_core::{core::time::ManualClock, store::Store};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Clock pinned to 2024-01-20 09:00 UTC, the demo dataset's "today".
pub fn pinned_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 1, 20, 9, 0, 0).unwrap(),
    ))
}

pub fn seeded_store() -> Store {
    Store::seeded(pinned_clock()).expect("bundled seed parses")
}

pub fn empty_store() -> Store {
    Store::new(pinned_clock())
}
