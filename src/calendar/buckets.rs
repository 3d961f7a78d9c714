use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::aggregate::total_spend;
use crate::domain::Amounted;

use super::CalendarMonth;

/// Records dated exactly `date`, in input order.
pub fn records_on<T, F>(records: &[T], date: NaiveDate, date_of: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> NaiveDate,
{
    records
        .iter()
        .filter(|record| date_of(*record) == date)
        .cloned()
        .collect()
}

pub fn total_on<T, F>(records: &[T], date: NaiveDate, date_of: F) -> f64
where
    T: Amounted,
    F: Fn(&T) -> NaiveDate,
{
    records
        .iter()
        .filter(|record| date_of(*record) == date)
        .map(Amounted::amount)
        .sum()
}

/// Same-day groups for every day of `month` that has at least one record.
pub fn bucket_by_day<T, F>(records: &[T], month: CalendarMonth, date_of: F) -> BTreeMap<NaiveDate, Vec<T>>
where
    T: Clone,
    F: Fn(&T) -> NaiveDate,
{
    let mut buckets: BTreeMap<NaiveDate, Vec<T>> = BTreeMap::new();
    for record in records {
        let date = date_of(record);
        if month.contains(date) {
            buckets.entry(date).or_default().push(record.clone());
        }
    }
    buckets
}

/// Size of the spending dot drawn on a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SpendIntensity {
    None,
    Small,
    Medium,
    Large,
    Huge,
}

impl SpendIntensity {
    pub fn for_amount(total: f64) -> Self {
        if total <= 0.0 {
            SpendIntensity::None
        } else if total < 50.0 {
            SpendIntensity::Small
        } else if total < 100.0 {
            SpendIntensity::Medium
        } else if total < 200.0 {
            SpendIntensity::Large
        } else {
            SpendIntensity::Huge
        }
    }

    pub fn for_records<T: Amounted>(records: &[T]) -> Self {
        Self::for_amount(total_spend(records))
    }

    pub fn marker(&self) -> &'static str {
        match self {
            SpendIntensity::None => " ",
            SpendIntensity::Small => ".",
            SpendIntensity::Medium => "o",
            SpendIntensity::Large => "O",
            SpendIntensity::Huge => "@",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Deal, NewDeal, Record};
    use chrono::Utc;
    use uuid::Uuid;

    fn date(day: u32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn deal(amount: f64, on: NaiveDate) -> Deal {
        Deal::build(
            Uuid::new_v4(),
            NewDeal::new("Tool", amount, on, "AppSumo", "Other"),
            Utc::now(),
        )
    }

    #[test]
    fn same_day_records_group_together() {
        let deals = vec![
            deal(20.0, date(12, 1)),
            deal(30.0, date(12, 1)),
            deal(40.0, date(13, 1)),
            deal(99.0, date(12, 2)),
        ];
        assert_eq!(records_on(&deals, date(12, 1), |d| d.purchase_date).len(), 2);
        assert_eq!(total_on(&deals, date(12, 1), |d| d.purchase_date), 50.0);

        let january = CalendarMonth::new(2024, 1).unwrap();
        let buckets = bucket_by_day(&deals, january, |d| d.purchase_date);
        assert_eq!(buckets.len(), 2);
        assert!(!buckets.contains_key(&date(12, 2)));
    }

    #[test]
    fn intensity_thresholds() {
        assert_eq!(SpendIntensity::for_amount(0.0), SpendIntensity::None);
        assert_eq!(SpendIntensity::for_amount(49.99), SpendIntensity::Small);
        assert_eq!(SpendIntensity::for_amount(50.0), SpendIntensity::Medium);
        assert_eq!(SpendIntensity::for_amount(100.0), SpendIntensity::Large);
        assert_eq!(SpendIntensity::for_amount(200.0), SpendIntensity::Huge);
    }
}
