pub use budgets::{BudgetProgress, budget_overview, budget_progress};
pub use filter::{ExpenseFilter, expenses_in_month, filter_expenses};
pub use groups::{
    CategoryTotal, MonthTotal, category_breakdown, distinct_category_count, monthly_breakdown,
    months_present, top_category,
};
pub use money::MoneyCents;
pub use month::{MonthKey, ParseMonthKeyError};
pub use summary::{SpendingSummary, spending_summary};

mod budgets;
mod filter;
mod groups;
mod money;
mod month;
mod summary;
