//! Stateless operations over an injected [`crate::store::Store`].

pub mod budget_service;
pub mod deal_service;
pub mod expense_service;
pub mod summary_service;
pub mod theme_service;

pub use budget_service::{BudgetLine, BudgetService, MonthlyOverview};
pub use deal_service::DealService;
pub use expense_service::ExpenseService;
pub use summary_service::{DashboardStats, DealBreakdown, SummaryService};
pub use theme_service::{ColorSchemeSource, EnvColorScheme, FixedColorScheme, ThemeService};

#[cfg(test)]
mod tests;
