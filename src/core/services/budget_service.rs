//! Categories, per-category monthly limits and the monthly budget overview.

use serde::Serialize;
use uuid::Uuid;

use crate::aggregate::{budget_status, share_of, total_spend, BudgetStatus};
use crate::calendar::CalendarMonth;
use crate::domain::{
    BudgetLimit, Category, CategoryPatch, Expense, LimitSettings, NewBudgetLimit, NewCategory,
};
use crate::errors::{DealVaultError, RecordKind, Result, ValidationErrors};
use crate::store::Store;

use super::ExpenseService;

/// Stateless budgeting operations over a [`Store`].
pub struct BudgetService;

/// Spend against the limit of one category for a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLine {
    pub category: Category,
    pub limit: BudgetLimit,
    pub status: BudgetStatus,
}

/// Everything the budget view renders for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyOverview {
    pub month: CalendarMonth,
    pub lines: Vec<BudgetLine>,
    pub total_spend: f64,
    pub total_budget: f64,
    /// Not capped; `0.0` when no budget is set.
    pub overall_percentage: f64,
    pub expenses: Vec<Expense>,
}

impl MonthlyOverview {
    pub fn lines_needing_attention(&self) -> impl Iterator<Item = &BudgetLine> {
        self.lines
            .iter()
            .filter(|line| line.status.is_over_budget || line.status.is_near_limit)
    }
}

impl BudgetService {
    pub fn categories(store: &Store) -> Vec<Category> {
        store.categories.all()
    }

    pub fn category(store: &Store, id: Uuid) -> Result<Category> {
        store.categories.get(id)
    }

    pub fn create_category(store: &mut Store, data: NewCategory) -> Result<Category> {
        if data.name.trim().is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("name", "Category name is required");
            return Err(DealVaultError::ValidationFailed(errors));
        }
        let now = store.now();
        let category = store.categories.insert(data, now);
        tracing::info!(id = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    pub fn update_category(store: &mut Store, id: Uuid, patch: CategoryPatch) -> Result<Category> {
        let now = store.now();
        store.categories.update(id, patch, now)
    }

    /// Removes a category together with its budget limits.
    ///
    /// Expenses keep their dangling `category_id`.
    pub fn delete_category(store: &mut Store, id: Uuid) -> Result<Category> {
        let removed = store.categories.remove(id)?;
        let cascaded = store.budget_limits.retain(|limit| limit.category_id != id);
        tracing::info!(id = %id, cascaded_limits = cascaded, "category deleted");
        Ok(removed)
    }

    pub fn budget_limits(store: &Store) -> Vec<BudgetLimit> {
        store.budget_limits.all()
    }

    pub fn budget_limit(store: &Store, id: Uuid) -> Result<BudgetLimit> {
        store.budget_limits.get(id)
    }

    pub fn limit_for_category(store: &Store, category_id: Uuid) -> Option<BudgetLimit> {
        store
            .budget_limits
            .find(|limit| limit.category_id == category_id)
    }

    /// Creates or replaces the limit of `category_id`.
    pub fn set_budget_limit(
        store: &mut Store,
        category_id: Uuid,
        settings: LimitSettings,
    ) -> Result<BudgetLimit> {
        let settings = settings.validate()?;
        let now = store.now();
        match Self::limit_for_category(store, category_id) {
            Some(existing) => store.budget_limits.update(existing.id, settings, now),
            None => {
                let limit = store.budget_limits.insert(
                    NewBudgetLimit {
                        category_id,
                        settings,
                    },
                    now,
                );
                tracing::info!(category = %category_id, limit = limit.monthly_limit, "budget limit set");
                Ok(limit)
            }
        }
    }

    /// Replaces the settings of the limit with record id `id`.
    pub fn update_budget_limit(
        store: &mut Store,
        id: Uuid,
        settings: LimitSettings,
    ) -> Result<BudgetLimit> {
        let settings = settings.validate()?;
        let now = store.now();
        store.budget_limits.update(id, settings, now)
    }

    /// Removes the limit of `category_id`; `NotFound` names the category id.
    pub fn delete_budget_limit(store: &mut Store, category_id: Uuid) -> Result<BudgetLimit> {
        let existing = Self::limit_for_category(store, category_id).ok_or_else(|| {
            tracing::warn!(category = %category_id, "no budget limit to delete");
            DealVaultError::not_found(RecordKind::BudgetLimit, category_id)
        })?;
        store.budget_limits.remove(existing.id)
    }

    /// Resolves the category of an expense; dangling references give `None`.
    pub fn category_for_expense(store: &Store, expense: &Expense) -> Option<Category> {
        store
            .categories
            .find(|category| category.id == expense.category_id)
    }

    /// Per-category budget usage for `month`.
    ///
    /// Only categories that have both a category record and a limit get a
    /// line. The totals cover every expense of the month and every limit.
    pub fn monthly_overview(store: &Store, month: CalendarMonth) -> MonthlyOverview {
        let expenses = ExpenseService::monthly(store, month);
        let lines = store
            .categories
            .iter()
            .filter_map(|category| {
                let limit = Self::limit_for_category(store, category.id)?;
                let spend: f64 = expenses
                    .iter()
                    .filter(|expense| expense.category_id == category.id)
                    .map(|expense| expense.amount)
                    .sum();
                let status = budget_status(spend, limit.monthly_limit, limit.alert_threshold);
                Some(BudgetLine {
                    category: category.clone(),
                    limit,
                    status,
                })
            })
            .collect();

        let total_spend = total_spend(&expenses);
        let total_budget: f64 = store
            .budget_limits
            .iter()
            .map(|limit| limit.monthly_limit)
            .sum();

        MonthlyOverview {
            month,
            lines,
            total_spend,
            total_budget,
            overall_percentage: share_of(total_spend, total_budget),
            expenses,
        }
    }
}
