pub mod category;
pub mod common;
pub mod deal;
pub mod expense;
pub mod theme;

pub use category::{
    BudgetLimit, Category, CategoryPatch, LimitSettings, NewBudgetLimit, NewCategory,
    DEFAULT_ALERT_THRESHOLD,
};
pub use common::{Amounted, Displayable, Identifiable, NamedEntity, Record};
pub use deal::{Deal, DealDraft, DealPatch, NewDeal, DEAL_CATEGORIES, KNOWN_SELLERS};
pub use expense::{Expense, ExpenseDraft, ExpensePatch, NewExpense};
pub use theme::Theme;
