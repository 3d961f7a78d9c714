//! CRUD plus month, range and category lookups for expenses.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::aggregate::total_spend;
use crate::calendar::CalendarMonth;
use crate::domain::{Expense, ExpensePatch, NewExpense};
use crate::errors::{DealVaultError, Result, ValidationErrors};
use crate::store::Store;

pub struct ExpenseService;

impl ExpenseService {
    pub fn get_all(store: &Store) -> Vec<Expense> {
        store.expenses.all()
    }

    pub fn get_by_id(store: &Store, id: Uuid) -> Result<Expense> {
        store.expenses.get(id)
    }

    /// Stores a new expense. The category id is not checked against the
    /// category collection.
    pub fn create(store: &mut Store, data: NewExpense) -> Result<Expense> {
        check_amount(data.amount)?;
        let now = store.now();
        let expense = store.expenses.insert(data, now);
        tracing::info!(id = %expense.id, category = %expense.category_id, "expense recorded");
        Ok(expense)
    }

    pub fn update(store: &mut Store, id: Uuid, patch: ExpensePatch) -> Result<Expense> {
        if let Some(amount) = patch.amount {
            check_amount(amount)?;
        }
        let now = store.now();
        store.expenses.update(id, patch, now)
    }

    pub fn delete(store: &mut Store, id: Uuid) -> Result<Expense> {
        store.expenses.remove(id)
    }

    pub fn by_category(store: &Store, category_id: Uuid) -> Vec<Expense> {
        store
            .expenses
            .filter(|expense| expense.category_id == category_id)
    }

    /// Expenses dated within `start..=end`.
    pub fn by_date_range(store: &Store, start: NaiveDate, end: NaiveDate) -> Vec<Expense> {
        store
            .expenses
            .filter(|expense| expense.date >= start && expense.date <= end)
    }

    /// Expenses dated inside `month`.
    pub fn monthly(store: &Store, month: CalendarMonth) -> Vec<Expense> {
        store.expenses.filter(|expense| month.contains(expense.date))
    }

    pub fn category_spending(store: &Store, category_id: Uuid, month: CalendarMonth) -> f64 {
        let expenses = store.expenses.filter(|expense| {
            expense.category_id == category_id && month.contains(expense.date)
        });
        total_spend(&expenses)
    }

    pub fn total_spending(store: &Store, month: CalendarMonth) -> f64 {
        total_spend(&Self::monthly(store, month))
    }
}

fn check_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        return Ok(());
    }
    let mut errors = ValidationErrors::new();
    errors.add("amount", "Amount must be greater than 0");
    Err(DealVaultError::ValidationFailed(errors))
}
