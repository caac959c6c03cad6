use api_types::budget::Budget;
use engine::{
    BudgetProgress, CategoryTotal, MonthKey, MonthTotal, SpendingSummary, budget_overview,
    category_breakdown, distinct_category_count, expenses_in_month, monthly_breakdown,
    months_present, spending_summary, top_category,
};

use crate::store::Snapshot;

/// Everything the dashboard shows for one month.
#[derive(Debug, Clone)]
pub struct MonthReport {
    pub month: MonthKey,
    pub summary: SpendingSummary,
    pub by_category: Vec<CategoryTotal>,
    pub top_category: Option<CategoryTotal>,
    pub budgets: Vec<BudgetProgress>,
}

pub fn month_report(snapshot: &Snapshot, month: MonthKey) -> MonthReport {
    let in_month = expenses_in_month(&snapshot.expenses, month);
    let month_raw = month.to_string();
    let month_budgets: Vec<Budget> = snapshot
        .budgets
        .iter()
        .filter(|budget| budget.month == month_raw)
        .cloned()
        .collect();
    MonthReport {
        month,
        summary: spending_summary(&in_month),
        by_category: category_breakdown(&in_month),
        top_category: top_category(&in_month),
        budgets: budget_overview(&month_budgets, &snapshot.expenses),
    }
}

/// Spending per month across everything on record, oldest first.
pub fn spending_trend(snapshot: &Snapshot) -> Vec<MonthTotal> {
    monthly_breakdown(&snapshot.expenses)
}

/// Months selectable in the dashboard, newest first.
pub fn month_options(snapshot: &Snapshot) -> Vec<MonthKey> {
    months_present(&snapshot.expenses)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetStats {
    pub expense_count: usize,
    pub category_count: usize,
    pub month_count: usize,
}

pub fn dataset_stats(snapshot: &Snapshot) -> DatasetStats {
    DatasetStats {
        expense_count: snapshot.expenses.len(),
        category_count: distinct_category_count(&snapshot.expenses),
        month_count: months_present(&snapshot.expenses).len(),
    }
}
