use std::{cmp::Ordering, fmt, str::FromStr};

use crate::errors::DealVaultError;

use super::{DealField, FieldValue, Fielded};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = DealVaultError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            other => Err(DealVaultError::InvalidInput(format!(
                "unknown sort direction `{other}`"
            ))),
        }
    }
}

/// Field key plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F> SortSpec<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl FromStr for SortSpec<DealField> {
    type Err = DealVaultError;

    /// Parses the `field-direction` keys of the deal list, e.g. `amount-desc`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (field, direction) = value.split_once('-').ok_or_else(|| {
            DealVaultError::InvalidInput(format!("sort key `{value}` must look like `amount-desc`"))
        })?;
        let field = match field.trim().to_ascii_lowercase().as_str() {
            "name" => DealField::Name,
            "amount" => DealField::Amount,
            "date" => DealField::PurchaseDate,
            "seller" => DealField::Seller,
            other => {
                return Err(DealVaultError::InvalidInput(format!(
                    "cannot sort deals by `{other}`"
                )))
            }
        };
        Ok(SortSpec::new(field, direction.parse()?))
    }
}

impl fmt::Display for SortSpec<DealField> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self.field {
            DealField::Name => "name",
            DealField::Amount => "amount",
            DealField::PurchaseDate => "date",
            DealField::Seller => "seller",
            DealField::Category => "category",
            DealField::Notes => "notes",
        };
        write!(f, "{}-{}", field, self.direction.as_str())
    }
}

/// Compares two field values: text case-insensitively, amounts numerically,
/// dates chronologically. Missing values sort first; mismatched kinds tie.
pub fn compare_values(a: &FieldValue<'_>, b: &FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Text(a), FieldValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (FieldValue::Amount(a), FieldValue::Amount(b)) => {
            a.partial_cmp(b).unwrap_or(Ordering::Equal)
        }
        (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
        (FieldValue::Id(a), FieldValue::Id(b)) => a.cmp(b),
        (FieldValue::Missing, FieldValue::Missing) => Ordering::Equal,
        (FieldValue::Missing, _) => Ordering::Less,
        (_, FieldValue::Missing) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Stable in-place sort; ties keep their input order in both directions.
pub fn sort_records<T: Fielded>(records: &mut [T], spec: SortSpec<T::Field>) {
    records.sort_by(|a, b| {
        let ordering = compare_values(&a.field(spec.field), &b.field(spec.field));
        match spec.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Deal, NewDeal, Record};
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn deal(name: &str, amount: f64, day: u32) -> Deal {
        Deal::build(
            Uuid::new_v4(),
            NewDeal::new(
                name,
                amount,
                NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                "AppSumo",
                "Other",
            ),
            Utc::now(),
        )
    }

    #[test]
    fn parses_ui_sort_keys() {
        let spec: SortSpec<DealField> = "amount-desc".parse().unwrap();
        assert_eq!(spec, SortSpec::new(DealField::Amount, SortDirection::Descending));
        let spec: SortSpec<DealField> = "date-asc".parse().unwrap();
        assert_eq!(spec.field, DealField::PurchaseDate);
        assert_eq!(spec.to_string(), "date-asc");
        assert!("amount".parse::<SortSpec<DealField>>().is_err());
        assert!("colour-asc".parse::<SortSpec<DealField>>().is_err());
    }

    #[test]
    fn name_sort_ignores_case() {
        let mut deals = vec![deal("beta", 1.0, 1), deal("Alpha", 2.0, 2), deal("gamma", 3.0, 3)];
        sort_records(&mut deals, SortSpec::new(DealField::Name, SortDirection::Ascending));
        let names: Vec<_> = deals.iter().map(|deal| deal.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let mut deals = vec![deal("first", 10.0, 1), deal("second", 10.0, 2), deal("third", 5.0, 3)];
        sort_records(&mut deals, SortSpec::new(DealField::Amount, SortDirection::Descending));
        let names: Vec<_> = deals.iter().map(|deal| deal.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn dates_sort_chronologically() {
        let mut deals = vec![deal("late", 1.0, 20), deal("early", 1.0, 2)];
        sort_records(
            &mut deals,
            SortSpec::new(DealField::PurchaseDate, SortDirection::Ascending),
        );
        assert_eq!(deals[0].name, "early");
    }
}
