//! Predicate filtering and type-aware sorting over record snapshots.

pub mod filter;
pub mod sort;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Deal, Expense};

pub use filter::{distinct_values, Query};
pub use sort::{sort_records, SortDirection, SortSpec};

/// Typed view of a single record field used by filters and comparators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Amount(f64),
    Date(NaiveDate),
    Id(Uuid),
    Missing,
}

impl FieldValue<'_> {
    /// Case-insensitive substring test; only text fields participate in search.
    pub fn contains_text(&self, needle_lower: &str) -> bool {
        match self {
            FieldValue::Text(text) => text.to_lowercase().contains(needle_lower),
            _ => false,
        }
    }

    /// Exact equality against the filter's textual form.
    pub fn equals_text(&self, expected: &str) -> bool {
        match self {
            FieldValue::Text(text) => *text == expected,
            FieldValue::Id(id) => Uuid::parse_str(expected).map_or(false, |parsed| parsed == *id),
            FieldValue::Amount(amount) => expected
                .parse::<f64>()
                .map_or(false, |parsed| parsed == *amount),
            FieldValue::Date(date) => NaiveDate::parse_from_str(expected, "%Y-%m-%d")
                .map_or(false, |parsed| parsed == *date),
            FieldValue::Missing => false,
        }
    }
}

/// Records whose fields can be addressed by a field key.
pub trait Fielded {
    type Field: Copy;

    fn field(&self, field: Self::Field) -> FieldValue<'_>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DealField {
    Name,
    Amount,
    PurchaseDate,
    Seller,
    Category,
    Notes,
}

impl Fielded for Deal {
    type Field = DealField;

    fn field(&self, field: DealField) -> FieldValue<'_> {
        match field {
            DealField::Name => FieldValue::Text(&self.name),
            DealField::Amount => FieldValue::Amount(self.amount),
            DealField::PurchaseDate => FieldValue::Date(self.purchase_date),
            DealField::Seller => FieldValue::Text(&self.seller),
            DealField::Category => FieldValue::Text(&self.category),
            DealField::Notes => FieldValue::Text(&self.notes),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseField {
    Description,
    Amount,
    Date,
    Seller,
    CategoryId,
    Notes,
}

impl Fielded for Expense {
    type Field = ExpenseField;

    fn field(&self, field: ExpenseField) -> FieldValue<'_> {
        match field {
            ExpenseField::Description => FieldValue::Text(&self.description),
            ExpenseField::Amount => FieldValue::Amount(self.amount),
            ExpenseField::Date => FieldValue::Date(self.date),
            ExpenseField::Seller => self
                .seller
                .as_deref()
                .map_or(FieldValue::Missing, FieldValue::Text),
            ExpenseField::CategoryId => FieldValue::Id(self.category_id),
            ExpenseField::Notes => FieldValue::Text(&self.notes),
        }
    }
}

/// Deal list query as used by the "All Deals" view.
pub type DealQuery = Query<DealField>;

/// Expense list query.
pub type ExpenseQuery = Query<ExpenseField>;

impl DealQuery {
    /// Searches name, seller and category; newest purchases first.
    pub fn for_deals() -> Self {
        Query::new([DealField::Name, DealField::Seller, DealField::Category])
            .sort(SortSpec::new(DealField::PurchaseDate, SortDirection::Descending))
    }
}

impl ExpenseQuery {
    /// Searches description, seller and notes; newest first.
    pub fn for_expenses() -> Self {
        Query::new([
            ExpenseField::Description,
            ExpenseField::Seller,
            ExpenseField::Notes,
        ])
        .sort(SortSpec::new(ExpenseField::Date, SortDirection::Descending))
    }
}
