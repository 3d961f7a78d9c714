use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::currency::month_label;
use crate::domain::{Amounted, Deal, Expense};

use super::totals::{share_of, total_spend};

/// Records that carry a seller and a category grouping key.
pub trait Grouped: Amounted {
    fn seller_key(&self) -> Option<&str>;

    fn category_key(&self) -> String;
}

impl Grouped for Deal {
    fn seller_key(&self) -> Option<&str> {
        Some(&self.seller)
    }

    fn category_key(&self) -> String {
        self.category.clone()
    }
}

impl Grouped for Expense {
    fn seller_key(&self) -> Option<&str> {
        self.seller.as_deref()
    }

    fn category_key(&self) -> String {
        self.category_id.to_string()
    }
}

/// Calendar month used as an ordered grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.year, month_label(self.month))
    }
}

/// Sums amounts per key; records whose key is `None` are skipped.
pub fn group_totals<T, K, F>(records: &[T], key: F) -> BTreeMap<K, f64>
where
    T: Amounted,
    K: Ord,
    F: Fn(&T) -> Option<K>,
{
    let mut totals = BTreeMap::new();
    for record in records {
        if let Some(key) = key(record) {
            *totals.entry(key).or_insert(0.0) += record.amount();
        }
    }
    totals
}

/// Monthly totals in chronological order.
pub fn group_by_month<T, F>(records: &[T], date: F) -> BTreeMap<MonthKey, f64>
where
    T: Amounted,
    F: Fn(&T) -> NaiveDate,
{
    group_totals(records, |record| Some(MonthKey::of(date(record))))
}

pub fn group_by_seller<T: Grouped>(records: &[T]) -> BTreeMap<String, f64> {
    group_totals(records, |record| record.seller_key().map(str::to_string))
}

pub fn group_by_category<T: Grouped>(records: &[T]) -> BTreeMap<String, f64> {
    group_totals(records, |record| Some(record.category_key()))
}

/// One slice of the category breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<T> {
    pub key: String,
    pub count: usize,
    pub total: f64,
    pub records: Vec<T>,
}

impl<T> CategoryGroup<T> {
    pub fn share_of(&self, grand_total: f64) -> f64 {
        share_of(self.total, grand_total)
    }

    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

/// Groups records by category, largest total first. Equal totals keep the
/// order in which their category first appears.
pub fn category_breakdown<T: Grouped + Clone>(records: &[T]) -> Vec<CategoryGroup<T>> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(String, Vec<T>)> = Vec::new();
    for record in records {
        let key = record.category_key();
        match positions.get(&key) {
            Some(index) => buckets[*index].1.push(record.clone()),
            None => {
                positions.insert(key.clone(), buckets.len());
                buckets.push((key, vec![record.clone()]));
            }
        }
    }

    let mut groups: Vec<CategoryGroup<T>> = buckets
        .into_iter()
        .map(|(key, records)| CategoryGroup {
            key,
            count: records.len(),
            total: total_spend(&records),
            records,
        })
        .collect();
    groups.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    groups
}
