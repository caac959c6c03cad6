use api_types::{budget::Budget, expense::Expense};

use crate::{MoneyCents, MonthKey};

/// Live progress of one budget against the recorded expenses.
///
/// Always recomputed from expense data; the cached `spent_minor` on the
/// record is never read.
#[derive(Clone, Debug, PartialEq)]
pub struct BudgetProgress {
    pub budget_id: i64,
    pub category: String,
    /// Budget period as stored (`YYYY-MM`).
    pub month: String,
    pub monthly_limit: MoneyCents,
    pub actual_spent: MoneyCents,
    /// Negative once the budget is exceeded.
    pub remaining: MoneyCents,
    /// Share of the limit used, clamped to 100 for display.
    pub percentage_used: f64,
    /// The same share without the clamp, for over-budget magnitude.
    pub percentage_unclamped: f64,
    pub is_over_budget: bool,
}

/// Computes spend, remainder, and usage for one budget.
///
/// Only expenses matching the budget's category and month count toward
/// it. A zero limit reports 0% used and flags over-budget as soon as
/// anything was spent. A `month` that does not parse as `YYYY-MM` matches
/// no expenses.
pub fn budget_progress(budget: &Budget, expenses: &[Expense]) -> BudgetProgress {
    let month: Option<MonthKey> = budget.month.parse().ok();
    let actual: i64 = expenses
        .iter()
        .filter(|expense| {
            expense.category == budget.category
                && month.is_some_and(|month| month.contains(expense.date))
        })
        .map(|expense| expense.amount_minor)
        .sum();

    let limit = budget.monthly_limit_minor;
    let percentage_unclamped = if limit == 0 {
        0.0
    } else {
        actual as f64 / limit as f64 * 100.0
    };

    BudgetProgress {
        budget_id: budget.id,
        category: budget.category.clone(),
        month: budget.month.clone(),
        monthly_limit: MoneyCents::new(limit),
        actual_spent: MoneyCents::new(actual),
        remaining: MoneyCents::new(limit - actual),
        percentage_used: percentage_unclamped.min(100.0),
        percentage_unclamped,
        is_over_budget: actual > limit,
    }
}

/// Progress for every budget, ranked for display: newest month first,
/// over-budget before under-budget, then by percentage used descending.
///
/// The sort is stable, so full ties keep input order.
pub fn budget_overview(budgets: &[Budget], expenses: &[Expense]) -> Vec<BudgetProgress> {
    let mut overview: Vec<BudgetProgress> = budgets
        .iter()
        .map(|budget| budget_progress(budget, expenses))
        .collect();

    overview.sort_by(|a, b| {
        b.month
            .cmp(&a.month)
            .then_with(|| b.is_over_budget.cmp(&a.is_over_budget))
            .then_with(|| b.percentage_used.total_cmp(&a.percentage_used))
    });
    overview
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(amount_minor: i64, category: &str, date: &str) -> Expense {
        Expense {
            id: 0,
            description: "expense".to_string(),
            amount_minor,
            category: category.to_string(),
            date: date.parse().unwrap(),
        }
    }

    fn budget(id: i64, category: &str, limit_minor: i64, month: &str) -> Budget {
        Budget {
            id,
            category: category.to_string(),
            monthly_limit_minor: limit_minor,
            month: month.to_string(),
            spent_minor: None,
            created_at: "2025-08-01T00:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn overspent_budget_reports_clamped_and_raw_percentages() {
        let budget = budget(1, "Food", 100_00, "2025-08");
        let expenses = vec![
            expense(90_00, "Food", "2025-08-05"),
            expense(60_00, "Food", "2025-08-20"),
        ];
        let progress = budget_progress(&budget, &expenses);
        assert_eq!(progress.actual_spent, MoneyCents::new(150_00));
        assert_eq!(progress.remaining, MoneyCents::new(-50_00));
        assert!(progress.is_over_budget);
        assert_eq!(progress.percentage_used, 100.0);
        assert_eq!(progress.percentage_unclamped, 150.0);
    }

    #[test]
    fn only_matching_category_and_month_count() {
        let budget = budget(1, "Food", 100_00, "2025-08");
        let expenses = vec![
            expense(10_00, "Food", "2025-08-05"),
            expense(20_00, "Transport", "2025-08-05"),
            expense(30_00, "Food", "2025-07-05"),
        ];
        let progress = budget_progress(&budget, &expenses);
        assert_eq!(progress.actual_spent, MoneyCents::new(10_00));
        assert!(!progress.is_over_budget);
        assert_eq!(progress.percentage_used, 10.0);
    }

    #[test]
    fn zero_limit_never_divides() {
        let zero = budget(1, "Food", 0, "2025-08");
        let untouched = budget_progress(&zero, &[]);
        assert_eq!(untouched.percentage_used, 0.0);
        assert!(!untouched.is_over_budget);

        let touched = budget_progress(&zero, &[expense(1_00, "Food", "2025-08-05")]);
        assert_eq!(touched.percentage_used, 0.0);
        assert_eq!(touched.percentage_unclamped, 0.0);
        assert!(touched.is_over_budget);
        assert_eq!(touched.remaining, MoneyCents::new(-1_00));
    }

    #[test]
    fn unparseable_month_matches_nothing() {
        let malformed = budget(1, "Food", 100_00, "perpetual");
        let progress = budget_progress(&malformed, &[expense(50_00, "Food", "2025-08-05")]);
        assert_eq!(progress.actual_spent, MoneyCents::ZERO);
        assert!(!progress.is_over_budget);
    }

    #[test]
    fn ranking_puts_newer_months_first() {
        let budgets = vec![
            budget(1, "Food", 100_00, "2025-07"),
            budget(2, "Food", 100_00, "2025-08"),
        ];
        let overview = budget_overview(&budgets, &[]);
        assert_eq!(overview[0].budget_id, 2);
        assert_eq!(overview[1].budget_id, 1);
    }

    #[test]
    fn ranking_puts_over_budget_first_within_a_month() {
        let budgets = vec![
            budget(1, "Food", 100_00, "2025-08"),
            budget(2, "Transport", 20_00, "2025-08"),
        ];
        let expenses = vec![
            expense(50_00, "Food", "2025-08-10"),
            expense(30_00, "Transport", "2025-08-10"),
        ];
        let overview = budget_overview(&budgets, &expenses);
        assert_eq!(overview[0].budget_id, 2);
        assert!(overview[0].is_over_budget);
        assert_eq!(overview[1].budget_id, 1);
    }

    #[test]
    fn ranking_breaks_remaining_ties_by_percentage_used() {
        let budgets = vec![
            budget(1, "Food", 100_00, "2025-08"),
            budget(2, "Transport", 100_00, "2025-08"),
        ];
        let expenses = vec![
            expense(40_00, "Food", "2025-08-10"),
            expense(70_00, "Transport", "2025-08-10"),
        ];
        let overview = budget_overview(&budgets, &expenses);
        assert_eq!(overview[0].budget_id, 2);
        assert_eq!(overview[0].percentage_used, 70.0);
        assert_eq!(overview[1].percentage_used, 40.0);
    }

    #[test]
    fn full_ties_keep_input_order() {
        let budgets = vec![
            budget(7, "Food", 100_00, "2025-08"),
            budget(3, "Transport", 100_00, "2025-08"),
        ];
        let overview = budget_overview(&budgets, &[]);
        assert_eq!(overview[0].budget_id, 7);
        assert_eq!(overview[1].budget_id, 3);
    }
}
