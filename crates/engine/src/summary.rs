use api_types::expense::Expense;

use crate::MoneyCents;

/// Headline metrics over a set of expenses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpendingSummary {
    pub total_spent: MoneyCents,
    /// `None` when there are no expenses to average.
    pub average_expense: Option<MoneyCents>,
    pub expense_count: usize,
}

impl SpendingSummary {
    pub const EMPTY: SpendingSummary = SpendingSummary {
        total_spent: MoneyCents::ZERO,
        average_expense: None,
        expense_count: 0,
    };
}

/// Sums and averages `expenses`.
///
/// Empty input yields zero totals and no average; the average is rounded
/// half-up to the nearest cent.
pub fn spending_summary(expenses: &[Expense]) -> SpendingSummary {
    let total: i64 = expenses.iter().map(|expense| expense.amount_minor).sum();
    let count = expenses.len();
    let average = (count > 0).then(|| {
        let count = count as i64;
        MoneyCents::new((total + count / 2) / count)
    });

    SpendingSummary {
        total_spent: MoneyCents::new(total),
        average_expense: average,
        expense_count: count,
    }
}
