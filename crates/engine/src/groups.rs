use std::collections::{HashMap, HashSet};

use api_types::expense::Expense;

use crate::{MoneyCents, MonthKey};

/// Total spend attributed to one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: MoneyCents,
}

/// Total spend inside one calendar month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthTotal {
    pub month: MonthKey,
    /// Humanized month for display, e.g. `"August 2025"`.
    pub label: String,
    pub total: MoneyCents,
}

/// Sums expenses per category, largest total first.
///
/// Categories with equal totals keep the order in which they first appear
/// in the input (stable sort).
pub fn category_breakdown(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();

    for expense in expenses {
        match index_by_name.get(expense.category.as_str()) {
            Some(&at) => totals[at].total += MoneyCents::new(expense.amount_minor),
            None => {
                index_by_name.insert(expense.category.as_str(), totals.len());
                totals.push(CategoryTotal {
                    category: expense.category.clone(),
                    total: MoneyCents::new(expense.amount_minor),
                });
            }
        }
    }

    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// Sums expenses per calendar month, oldest first.
///
/// Ordering uses the month key itself, never the humanized label, so
/// December 2024 sorts before January 2025.
pub fn monthly_breakdown(expenses: &[Expense]) -> Vec<MonthTotal> {
    let mut totals: HashMap<MonthKey, i64> = HashMap::new();
    for expense in expenses {
        *totals
            .entry(MonthKey::from_date(expense.date))
            .or_insert(0) += expense.amount_minor;
    }

    let mut months: Vec<MonthTotal> = totals
        .into_iter()
        .map(|(month, total)| MonthTotal {
            month,
            label: month.label(),
            total: MoneyCents::new(total),
        })
        .collect();
    months.sort_by_key(|entry| entry.month);
    months
}

/// The biggest-spend category, or `None` when there are no expenses.
pub fn top_category(expenses: &[Expense]) -> Option<CategoryTotal> {
    category_breakdown(expenses).into_iter().next()
}

/// Number of distinct categories appearing in `expenses`.
///
/// Filter options come from the backend's category list; this count
/// reflects the recorded data only.
pub fn distinct_category_count(expenses: &[Expense]) -> usize {
    expenses
        .iter()
        .map(|expense| expense.category.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// De-duplicated months of the expense dates, most recent first.
///
/// Used to populate month selectors.
pub fn months_present(expenses: &[Expense]) -> Vec<MonthKey> {
    let mut months: Vec<MonthKey> = expenses
        .iter()
        .map(|expense| MonthKey::from_date(expense.date))
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    months.sort_by(|a, b| b.cmp(a));
    months
}
