//! Month context, day grid and same-day bucketing for the calendar view.

pub mod buckets;
pub mod month;

pub use buckets::{bucket_by_day, records_on, total_on, SpendIntensity};
pub use month::{CalendarDay, CalendarMonth};
