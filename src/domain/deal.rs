//! Lifetime-deal purchases and their entry form.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::errors::{RecordKind, Result, ValidationErrors};

/// Marketplaces offered as seller suggestions when recording a deal.
pub const KNOWN_SELLERS: &[&str] = &[
    "AppSumo",
    "Prime Club",
    "StackSocial",
    "PitchGround",
    "SaaS Mantra",
    "Earlybird",
    "RocketHub",
];

/// Category suggestions for deals. Deals may use any other label too.
pub const DEAL_CATEGORIES: &[&str] = &[
    "Design Tools",
    "Marketing",
    "Productivity",
    "Development",
    "Business",
    "Education",
    "Analytics",
    "Communication",
    "Finance",
    "Other",
];

/// A recorded lifetime-license software purchase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub purchase_date: NaiveDate,
    pub seller: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for Deal {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Deal {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for Deal {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Deal {
    fn display_label(&self) -> String {
        format!("{} ({}, {})", self.name, self.seller, self.purchase_date)
    }
}

impl Record for Deal {
    type New = NewDeal;
    type Patch = DealPatch;

    const KIND: RecordKind = RecordKind::Deal;

    fn build(id: Uuid, data: NewDeal, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: data.name,
            amount: data.amount,
            purchase_date: data.purchase_date,
            seller: data.seller,
            category: data.category,
            tags: data.tags,
            notes: data.notes,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: DealPatch, now: DateTime<Utc>) {
        merge(&mut self.name, patch.name);
        merge(&mut self.amount, patch.amount);
        merge(&mut self.purchase_date, patch.purchase_date);
        merge(&mut self.seller, patch.seller);
        merge(&mut self.category, patch.category);
        merge(&mut self.tags, patch.tags);
        merge(&mut self.notes, patch.notes);
        self.updated_at = now;
    }
}

/// Payload accepted when creating a deal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewDeal {
    pub name: String,
    pub amount: f64,
    pub purchase_date: NaiveDate,
    pub seller: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl NewDeal {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        purchase_date: NaiveDate,
        seller: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            purchase_date,
            seller: seller.into(),
            category: category.into(),
            tags: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Partial update for a [`Deal`]; unset fields are preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealPatch {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub purchase_date: Option<NaiveDate>,
    pub seller: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
}

impl DealPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl From<NewDeal> for DealPatch {
    /// A full form resubmission overwrites every editable field.
    fn from(data: NewDeal) -> Self {
        Self {
            name: Some(data.name),
            amount: Some(data.amount),
            purchase_date: Some(data.purchase_date),
            seller: Some(data.seller),
            category: Some(data.category),
            tags: Some(data.tags),
            notes: Some(data.notes),
        }
    }
}

/// Raw text captured by the deal entry form before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealDraft {
    pub name: String,
    pub amount: String,
    pub purchase_date: String,
    pub seller: String,
    pub category: String,
    pub tags: String,
    pub notes: String,
}

impl DealDraft {
    /// Pre-fills the form from an existing deal for editing.
    pub fn from_deal(deal: &Deal) -> Self {
        Self {
            name: deal.name.clone(),
            amount: deal.amount.to_string(),
            purchase_date: deal.purchase_date.format("%Y-%m-%d").to_string(),
            seller: deal.seller.clone(),
            category: deal.category.clone(),
            tags: deal.tags.join(", "),
            notes: deal.notes.clone(),
        }
    }

    /// Checks every required field and converts the draft into a [`NewDeal`].
    pub fn validate(&self) -> Result<NewDeal> {
        let mut errors = ValidationErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", "Deal name is required");
        }
        let amount = parse_positive_amount(&self.amount);
        if amount.is_none() {
            errors.add("amount", "Valid amount is required");
        }
        let purchase_date = parse_date(&self.purchase_date);
        match &purchase_date {
            DateInput::Missing => errors.add("purchaseDate", "Purchase date is required"),
            DateInput::Invalid => errors.add("purchaseDate", "Purchase date must be YYYY-MM-DD"),
            DateInput::Valid(_) => {}
        }
        if self.seller.trim().is_empty() {
            errors.add("seller", "Seller is required");
        }
        if self.category.trim().is_empty() {
            errors.add("category", "Category is required");
        }

        errors.into_result(|| NewDeal {
            name: name.to_string(),
            amount: amount.unwrap_or_default(),
            purchase_date: purchase_date.date().unwrap_or_default(),
            seller: self.seller.trim().to_string(),
            category: self.category.trim().to_string(),
            tags: split_tags(&self.tags),
            notes: self.notes.trim().to_string(),
        })
    }
}

/// Splits a comma-separated tag list, dropping blank entries.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn parse_positive_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

pub(crate) enum DateInput {
    Missing,
    Invalid,
    Valid(NaiveDate),
}

impl DateInput {
    pub(crate) fn date(&self) -> Option<NaiveDate> {
        match self {
            DateInput::Valid(date) => Some(*date),
            _ => None,
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> DateInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DateInput::Missing;
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => DateInput::Valid(date),
        Err(_) => DateInput::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> DealDraft {
        DealDraft {
            name: "  Canva Pro Lifetime ".into(),
            amount: "119".into(),
            purchase_date: "2024-01-10".into(),
            seller: "StackSocial".into(),
            category: "Design Tools".into(),
            tags: "design, , graphics ,".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn validate_trims_and_splits_tags() {
        let deal = complete_draft().validate().expect("draft is valid");
        assert_eq!(deal.name, "Canva Pro Lifetime");
        assert_eq!(deal.amount, 119.0);
        assert_eq!(deal.tags, vec!["design".to_string(), "graphics".to_string()]);
        assert_eq!(
            deal.purchase_date,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
    }

    #[test]
    fn validate_reports_every_missing_field() {
        let err = DealDraft::default().validate().expect_err("empty draft");
        let crate::errors::DealVaultError::ValidationFailed(errors) = err else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(errors.get("name"), Some("Deal name is required"));
        assert_eq!(errors.get("amount"), Some("Valid amount is required"));
        assert_eq!(errors.get("purchaseDate"), Some("Purchase date is required"));
        assert_eq!(errors.get("seller"), Some("Seller is required"));
        assert_eq!(errors.get("category"), Some("Category is required"));
    }

    #[test]
    fn validate_rejects_non_positive_amounts() {
        for amount in ["0", "-5", "abc", "NaN"] {
            let mut draft = complete_draft();
            draft.amount = amount.into();
            assert!(draft.validate().is_err(), "amount {amount} should fail");
        }
    }

    #[test]
    fn patch_from_new_deal_overwrites_everything() {
        let data = complete_draft().validate().unwrap();
        let patch = DealPatch::from(data);
        assert!(!patch.is_empty());
        assert!(DealPatch::default().is_empty());
    }
}
