use api_types::expense::Expense;
use chrono::NaiveDate;

use crate::MonthKey;

/// Criteria for narrowing an expense list.
///
/// Absent fields are no-ops, so the default filter passes everything
/// through.
#[derive(Clone, Debug, Default)]
pub struct ExpenseFilter {
    /// Keep expenses dated on or after this day.
    pub start_date: Option<NaiveDate>,
    /// Keep expenses dated on or before this day.
    pub end_date: Option<NaiveDate>,
    /// Keep expenses with exactly this category.
    pub category: Option<String>,
}

/// Returns the expenses matching `filter`, preserving input order.
pub fn filter_expenses(expenses: &[Expense], filter: &ExpenseFilter) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| {
            filter.start_date.is_none_or(|start| expense.date >= start)
                && filter.end_date.is_none_or(|end| expense.date <= end)
                && filter
                    .category
                    .as_deref()
                    .is_none_or(|category| expense.category == category)
        })
        .cloned()
        .collect()
}

/// Returns the expenses dated inside `month`, preserving input order.
///
/// This is the dashboard's "selected month" view.
pub fn expenses_in_month(expenses: &[Expense], month: MonthKey) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| month.contains(expense.date))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: i64, category: &str, date: &str) -> Expense {
        Expense {
            id,
            description: format!("expense {id}"),
            amount_minor: 1000,
            category: category.to_string(),
            date: date.parse().unwrap(),
        }
    }

    fn ids(expenses: &[Expense]) -> Vec<i64> {
        expenses.iter().map(|expense| expense.id).collect()
    }

    #[test]
    fn default_filter_passes_everything_through() {
        let all = vec![
            expense(1, "Food", "2025-08-01"),
            expense(2, "Transport", "2025-08-02"),
            expense(3, "Food", "2025-07-30"),
        ];
        let filtered = filter_expenses(&all, &ExpenseFilter::default());
        assert_eq!(filtered, all);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let all = vec![
            expense(1, "Food", "2025-08-01"),
            expense(2, "Food", "2025-08-10"),
            expense(3, "Food", "2025-08-20"),
        ];
        let filter = ExpenseFilter {
            start_date: Some("2025-08-01".parse().unwrap()),
            end_date: Some("2025-08-10".parse().unwrap()),
            ..ExpenseFilter::default()
        };
        assert_eq!(ids(&filter_expenses(&all, &filter)), vec![1, 2]);
    }

    #[test]
    fn category_filter_preserves_input_order() {
        let all = vec![
            expense(1, "Food", "2025-08-01"),
            expense(2, "Transport", "2025-08-02"),
            expense(3, "Food", "2025-08-03"),
            expense(4, "Food", "2025-07-01"),
        ];
        let filter = ExpenseFilter {
            category: Some("Food".to_string()),
            ..ExpenseFilter::default()
        };
        assert_eq!(ids(&filter_expenses(&all, &filter)), vec![1, 3, 4]);
    }

    #[test]
    fn month_filter_ignores_other_months() {
        let all = vec![
            expense(1, "Food", "2025-08-01"),
            expense(2, "Food", "2025-07-31"),
            expense(3, "Food", "2025-08-31"),
            expense(4, "Food", "2024-08-15"),
        ];
        let month: MonthKey = "2025-08".parse().unwrap();
        assert_eq!(ids(&expenses_in_month(&all, month)), vec![1, 3]);
    }
}
