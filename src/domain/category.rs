//! Spending categories and their monthly budget limits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::errors::{RecordKind, Result, ValidationErrors};

/// Alert threshold applied when a limit is set without one, in percent.
pub const DEFAULT_ALERT_THRESHOLD: f64 = 80.0;

/// A user-defined spending bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.color)
    }
}

impl Record for Category {
    type New = NewCategory;
    type Patch = CategoryPatch;

    const KIND: RecordKind = RecordKind::Category;

    fn build(id: Uuid, data: NewCategory, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: data.name,
            color: data.color,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, patch: CategoryPatch, now: DateTime<Utc>) {
        merge(&mut self.name, patch.name);
        merge(&mut self.color, patch.color);
        self.updated_at = Some(now);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Monthly spending ceiling and alert threshold for one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLimit {
    pub id: Uuid,
    pub category_id: Uuid,
    pub monthly_limit: f64,
    pub alert_threshold: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identifiable for BudgetLimit {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for BudgetLimit {
    type New = NewBudgetLimit;
    type Patch = LimitSettings;

    const KIND: RecordKind = RecordKind::BudgetLimit;

    fn build(id: Uuid, data: NewBudgetLimit, now: DateTime<Utc>) -> Self {
        Self {
            id,
            category_id: data.category_id,
            monthly_limit: data.settings.monthly_limit,
            alert_threshold: data.settings.alert_threshold,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, patch: LimitSettings, now: DateTime<Utc>) {
        self.monthly_limit = patch.monthly_limit;
        self.alert_threshold = patch.alert_threshold;
        self.updated_at = Some(now);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBudgetLimit {
    pub category_id: Uuid,
    pub settings: LimitSettings,
}

/// The user-editable part of a [`BudgetLimit`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LimitSettings {
    pub monthly_limit: f64,
    pub alert_threshold: f64,
}

impl LimitSettings {
    pub fn new(monthly_limit: f64, alert_threshold: f64) -> Self {
        Self {
            monthly_limit,
            alert_threshold,
        }
    }

    pub fn with_default_threshold(monthly_limit: f64) -> Self {
        Self::new(monthly_limit, DEFAULT_ALERT_THRESHOLD)
    }

    pub fn validate(self) -> Result<Self> {
        let mut errors = ValidationErrors::new();
        if !(self.monthly_limit.is_finite() && self.monthly_limit > 0.0) {
            errors.add("monthlyLimit", "Monthly limit must be greater than 0");
        }
        if !(0.0..=100.0).contains(&self.alert_threshold) {
            errors.add("alertThreshold", "Alert threshold must be between 0 and 100");
        }
        errors.into_result(|| self)
    }
}
