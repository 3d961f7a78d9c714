pub mod services;
pub mod time;

pub use services::{BudgetService, DealService, ExpenseService, SummaryService, ThemeService};
pub use time::{Clock, ManualClock, SystemClock};
