//! Budgeted spending entries tied to a category.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::domain::deal::{parse_date, parse_positive_amount, DateInput};
use crate::errors::{RecordKind, Result, ValidationErrors};

/// A spending entry recorded against a [`crate::domain::Category`].
///
/// `category_id` is not checked against the category collection; an expense
/// whose category was deleted stays in place and simply resolves to nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub category_id: Uuid,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        match &self.seller {
            Some(seller) => format!("{} ({}, {})", self.description, seller, self.date),
            None => format!("{} ({})", self.description, self.date),
        }
    }
}

impl Record for Expense {
    type New = NewExpense;
    type Patch = ExpensePatch;

    const KIND: RecordKind = RecordKind::Expense;

    fn build(id: Uuid, data: NewExpense, now: DateTime<Utc>) -> Self {
        Self {
            id,
            description: data.description,
            amount: data.amount,
            category_id: data.category_id,
            date: data.date,
            seller: data.seller,
            notes: data.notes,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, patch: ExpensePatch, now: DateTime<Utc>) {
        merge(&mut self.description, patch.description);
        merge(&mut self.amount, patch.amount);
        merge(&mut self.category_id, patch.category_id);
        merge(&mut self.date, patch.date);
        merge(&mut self.seller, patch.seller);
        merge(&mut self.notes, patch.notes);
        self.updated_at = Some(now);
    }
}

/// Payload accepted when creating an expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub category_id: Uuid,
    pub date: NaiveDate,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl NewExpense {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category_id: Uuid,
        date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            category_id,
            date,
            seller: None,
            notes: String::new(),
        }
    }

    pub fn with_seller(mut self, seller: impl Into<String>) -> Self {
        self.seller = Some(seller.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Partial update for an [`Expense`]. `seller: Some(None)` clears the seller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub category_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub seller: Option<Option<String>>,
    pub notes: Option<String>,
}

/// Raw text captured by the expense entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: String,
    pub category_id: String,
    pub date: String,
    pub seller: String,
    pub notes: String,
}

impl ExpenseDraft {
    pub fn validate(&self) -> Result<NewExpense> {
        let mut errors = ValidationErrors::new();

        let description = self.description.trim();
        if description.is_empty() {
            errors.add("description", "Description is required");
        }
        let amount = parse_positive_amount(&self.amount);
        if amount.is_none() {
            errors.add("amount", "Amount must be greater than 0");
        }
        let category_id = match self.category_id.trim() {
            "" => {
                errors.add("categoryId", "Category is required");
                None
            }
            raw => match Uuid::parse_str(raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.add("categoryId", "Category is not a valid identifier");
                    None
                }
            },
        };
        let date = parse_date(&self.date);
        match &date {
            DateInput::Missing => errors.add("date", "Date is required"),
            DateInput::Invalid => errors.add("date", "Date must be YYYY-MM-DD"),
            DateInput::Valid(_) => {}
        }

        let seller = Some(self.seller.trim())
            .filter(|seller| !seller.is_empty())
            .map(str::to_string);

        errors.into_result(|| NewExpense {
            description: description.to_string(),
            amount: amount.unwrap_or_default(),
            category_id: category_id.unwrap_or_default(),
            date: date.date().unwrap_or_default(),
            seller,
            notes: self.notes.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DealVaultError;

    #[test]
    fn blank_seller_becomes_none() {
        let draft = ExpenseDraft {
            description: "Figma seat".into(),
            amount: "12.5".into(),
            category_id: Uuid::new_v4().to_string(),
            date: "2024-03-02".into(),
            seller: "   ".into(),
            notes: String::new(),
        };
        let expense = draft.validate().expect("valid draft");
        assert_eq!(expense.seller, None);
        assert_eq!(expense.amount, 12.5);
    }

    #[test]
    fn invalid_category_identifier_is_reported() {
        let draft = ExpenseDraft {
            description: "Hosting".into(),
            amount: "0".into(),
            category_id: "not-a-uuid".into(),
            date: "03/02/2024".into(),
            ..ExpenseDraft::default()
        };
        let Err(DealVaultError::ValidationFailed(errors)) = draft.validate() else {
            panic!("draft should fail validation");
        };
        assert_eq!(errors.get("amount"), Some("Amount must be greater than 0"));
        assert_eq!(
            errors.get("categoryId"),
            Some("Category is not a valid identifier")
        );
        assert_eq!(errors.get("date"), Some("Date must be YYYY-MM-DD"));
        assert_eq!(errors.get("description"), None);
    }

    #[test]
    fn patch_can_clear_seller() {
        let now = Utc::now();
        let mut expense = Expense::build(
            Uuid::new_v4(),
            NewExpense::new("Zapier", 49.0, Uuid::new_v4(), now.date_naive())
                .with_seller("AppSumo"),
            now,
        );
        expense.apply(
            ExpensePatch {
                seller: Some(None),
                ..ExpensePatch::default()
            },
            now,
        );
        assert_eq!(expense.seller, None);
        assert_eq!(expense.updated_at, Some(now));
    }
}
