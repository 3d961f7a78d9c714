//! Totals, groupings and budget classification over record snapshots.
//!
//! Every function here is pure: it reads the slice it is given and never
//! touches the store.

pub mod budget_status;
pub mod grouping;
pub mod totals;

pub use budget_status::{budget_status, BudgetStatus};
pub use grouping::{
    category_breakdown, group_by_category, group_by_month, group_by_seller, group_totals,
    CategoryGroup, MonthKey,
};
pub use totals::{average_value, share_of, total_spend};
