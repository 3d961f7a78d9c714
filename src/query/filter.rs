use std::collections::BTreeSet;

use super::{sort::sort_records, FieldValue, Fielded, SortSpec};

/// Search term, exact-match filters and an optional sort, combined with AND.
///
/// An empty search term or an empty filter value places no constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Query<F> {
    search: String,
    search_fields: Vec<F>,
    filters: Vec<(F, String)>,
    sort: Option<SortSpec<F>>,
}

impl<F: Copy> Query<F> {
    pub fn new<I>(search_fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
    {
        Self {
            search: String::new(),
            search_fields: search_fields.into_iter().collect(),
            filters: Vec::new(),
            sort: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn filter(mut self, field: F, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.filters.push((field, value));
        }
        self
    }

    pub fn sort(mut self, spec: SortSpec<F>) -> Self {
        self.sort = Some(spec);
        self
    }

    pub fn unsorted(mut self) -> Self {
        self.sort = None;
        self
    }

    pub fn sort_spec(&self) -> Option<SortSpec<F>> {
        self.sort
    }

    /// True when a search term or any filter narrows the result.
    pub fn is_narrowing(&self) -> bool {
        !self.search.trim().is_empty() || !self.filters.is_empty()
    }

    pub fn matches<T>(&self, record: &T) -> bool
    where
        T: Fielded<Field = F>,
    {
        self.matches_search(record) && self.matches_filters(record)
    }

    /// Filters then stably sorts a copy of `records`.
    pub fn apply<T>(&self, records: &[T]) -> Vec<T>
    where
        T: Fielded<Field = F> + Clone,
    {
        let mut selected: Vec<T> = records
            .iter()
            .filter(|record| self.matches(*record))
            .cloned()
            .collect();
        if let Some(spec) = self.sort {
            sort_records(&mut selected, spec);
        }
        selected
    }

    fn matches_search<T>(&self, record: &T) -> bool
    where
        T: Fielded<Field = F>,
    {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields
            .iter()
            .any(|field| record.field(*field).contains_text(&needle))
    }

    fn matches_filters<T>(&self, record: &T) -> bool
    where
        T: Fielded<Field = F>,
    {
        self.filters
            .iter()
            .all(|(field, expected)| record.field(*field).equals_text(expected))
    }
}

/// Sorted distinct text values of `field`, e.g. the options of a filter dropdown.
pub fn distinct_values<T: Fielded>(records: &[T], field: T::Field) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| match record.field(field) {
            FieldValue::Text(text) => Some(text.to_string()),
            _ => None,
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{DealField, DealQuery, SortDirection};
    use crate::domain::{Deal, NewDeal, Record};
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn deal(name: &str, amount: f64, seller: &str, category: &str) -> Deal {
        Deal::build(
            Uuid::new_v4(),
            NewDeal::new(
                name,
                amount,
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                seller,
                category,
            ),
            Utc::now(),
        )
    }

    fn sample() -> Vec<Deal> {
        vec![
            deal("Canva Pro Lifetime", 119.0, "StackSocial", "Design Tools"),
            deal("Notion Pro Plan", 199.0, "PitchGround", "Productivity"),
            deal("Brand kit", 49.0, "Canvaworld", "Marketing"),
            deal("Frase", 69.0, "AppSumo", "Marketing"),
        ]
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let mut deals = sample();
        deals.push(deal("Stock Photos", 39.0, "AppSumo", "Canva Add-ons"));
        let found = DealQuery::for_deals().search("CANVA").apply(&deals);
        let names: Vec<_> = found.iter().map(|deal| deal.name.as_str()).collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"Canva Pro Lifetime"));
        assert!(names.contains(&"Brand kit"));
        assert!(names.contains(&"Stock Photos"));
    }

    #[test]
    fn blank_search_matches_everything() {
        let deals = sample();
        assert_eq!(DealQuery::for_deals().search("   ").apply(&deals).len(), 4);
        assert!(!DealQuery::for_deals().search("  ").is_narrowing());
    }

    #[test]
    fn filters_and_search_combine_with_and() {
        let deals = sample();
        let found = DealQuery::for_deals()
            .search("a")
            .filter(DealField::Category, "Marketing")
            .filter(DealField::Seller, "")
            .sort(SortSpec::new(DealField::Amount, SortDirection::Ascending))
            .apply(&deals);
        let names: Vec<_> = found.iter().map(|deal| deal.name.as_str()).collect();
        assert_eq!(names, vec!["Brand kit", "Frase"]);
    }

    #[test]
    fn categorical_filter_is_exact() {
        let deals = sample();
        let found = DealQuery::for_deals()
            .filter(DealField::Category, "marketing")
            .apply(&deals);
        assert!(found.is_empty());
    }

    #[test]
    fn distinct_values_are_sorted_and_unique() {
        let deals = sample();
        assert_eq!(
            distinct_values(&deals, DealField::Category),
            vec!["Design Tools", "Marketing", "Productivity"]
        );
    }
}
