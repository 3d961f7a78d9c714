//! In-memory record store owned by the application's composition root.

pub mod collection;
pub mod seed;

use std::{fmt, sync::Arc};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::time::{Clock, SystemClock};
use crate::domain::{BudgetLimit, Category, Deal, Expense};

pub use collection::Collection;

/// Serializable image of an entire [`Store`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    #[serde(default)]
    pub deals: Vec<Deal>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub budget_limits: Vec<BudgetLimit>,
}

/// Holds one collection per record kind plus the clock used for timestamps.
///
/// Services borrow the store immutably for reads and mutably for writes, so
/// every write is serialized by the borrow checker.
pub struct Store {
    pub(crate) deals: Collection<Deal>,
    pub(crate) expenses: Collection<Expense>,
    pub(crate) categories: Collection<Category>,
    pub(crate) budget_limits: Collection<BudgetLimit>,
    clock: Arc<dyn Clock>,
}

impl Store {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::from_snapshot(StoreSnapshot::default(), clock)
    }

    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    pub fn from_snapshot(snapshot: StoreSnapshot, clock: Arc<dyn Clock>) -> Self {
        Self {
            deals: Collection::from_records(snapshot.deals),
            expenses: Collection::from_records(snapshot.expenses),
            categories: Collection::from_records(snapshot.categories),
            budget_limits: Collection::from_records(snapshot.budget_limits),
            clock,
        }
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            deals: self.deals.all(),
            expenses: self.expenses.all(),
            categories: self.categories.all(),
            budget_limits: self.budget_limits.all(),
        }
    }

    /// Swaps every collection for the snapshot contents, keeping the clock.
    pub fn replace(&mut self, snapshot: StoreSnapshot) {
        let clock = Arc::clone(&self.clock);
        *self = Self::from_snapshot(snapshot, clock);
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn deals(&self) -> &Collection<Deal> {
        &self.deals
    }

    pub fn expenses(&self) -> &Collection<Expense> {
        &self.expenses
    }

    pub fn categories(&self) -> &Collection<Category> {
        &self.categories
    }

    pub fn budget_limits(&self) -> &Collection<BudgetLimit> {
        &self.budget_limits
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::with_system_clock()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("deals", &self.deals.len())
            .field("expenses", &self.expenses.len())
            .field("categories", &self.categories.len())
            .field("budget_limits", &self.budget_limits.len())
            .finish()
    }
}
