use crate::domain::Amounted;

/// Sum of every record amount; `0.0` for an empty slice.
pub fn total_spend<T: Amounted>(records: &[T]) -> f64 {
    records.iter().map(Amounted::amount).sum()
}

/// Mean record amount; `0.0` for an empty slice rather than NaN.
pub fn average_value<T: Amounted>(records: &[T]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    total_spend(records) / records.len() as f64
}

/// Percentage of `total` represented by `part`; `0.0` when `total` is not positive.
pub fn share_of(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}
