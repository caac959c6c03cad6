use std::time::{Duration, Instant};

use api_types::{
    budget::{Budget, BudgetNew, BudgetUpdate},
    expense::{Expense, ExpenseNew, ExpenseUpdate},
};
use chrono::Utc;
use client::{ListQuery, StoreClient};
use engine::MonthKey;

use crate::error::{AppError, Result};

/// How long a snapshot keeps serving reads before the next one refetches.
const SNAPSHOT_TTL: Duration = Duration::from_secs(5 * 60);

/// One coherent view of the backend data, taken at a single point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub expenses: Vec<Expense>,
    pub budgets: Vec<Budget>,
    pub categories: Vec<String>,
    pub(crate) fetched_at: Instant,
}

impl Snapshot {
    fn is_stale(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() > ttl
    }
}

/// Client-side cache over the backend. Reads are served from the snapshot,
/// mutations go straight through and drop it.
pub struct Store {
    client: StoreClient,
    cached: Option<Snapshot>,
    ttl: Duration,
}

impl Store {
    pub fn new(client: StoreClient) -> Self {
        Self::with_ttl(client, SNAPSHOT_TTL)
    }

    pub fn with_ttl(client: StoreClient, ttl: Duration) -> Self {
        Self {
            client,
            cached: None,
            ttl,
        }
    }

    /// Current snapshot, refetched when missing or older than the TTL.
    pub async fn snapshot(&mut self) -> Result<&Snapshot> {
        let kept = self
            .cached
            .take()
            .filter(|snapshot| !snapshot.is_stale(self.ttl));
        let snapshot = match kept {
            Some(snapshot) => snapshot,
            None => self.fetch().await?,
        };
        Ok(self.cached.insert(snapshot))
    }

    /// Refetches unconditionally, replacing whatever was cached.
    pub async fn refresh(&mut self) -> Result<&Snapshot> {
        let snapshot = self.fetch().await?;
        Ok(self.cached.insert(snapshot))
    }

    /// Fetches expenses, budgets and categories as one unit.
    async fn fetch(&self) -> Result<Snapshot> {
        let expenses = self.client.list_expenses(&ListQuery::all()).await?;
        let budgets = self.client.list_budgets(&ListQuery::all()).await?;
        let categories = self.client.list_categories().await?;
        tracing::debug!(
            "snapshot refreshed: {} expenses, {} budgets, {} categories",
            expenses.len(),
            budgets.len(),
            categories.len()
        );
        Ok(Snapshot {
            expenses,
            budgets,
            categories,
            fetched_at: Instant::now(),
        })
    }

    /// Drops the cached snapshot so the next read refetches.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub async fn add_expense(&mut self, draft: ExpenseNew) -> Result<Expense> {
        let categories = self.known_categories().await?;
        validate_expense(&draft, &categories)?;
        let created = self.client.create_expense(&draft).await?;
        tracing::info!("created expense {}", created.id);
        self.invalidate();
        Ok(created)
    }

    pub async fn edit_expense(&mut self, id: i64, patch: ExpenseUpdate) -> Result<Expense> {
        let categories = self.known_categories().await?;
        validate_expense_patch(&patch, &categories)?;
        let updated = self.client.update_expense(id, &patch).await?;
        tracing::info!("updated expense {id}");
        self.invalidate();
        Ok(updated)
    }

    pub async fn remove_expense(&mut self, id: i64) -> Result<()> {
        self.client.delete_expense(id).await?;
        tracing::info!("deleted expense {id}");
        self.invalidate();
        Ok(())
    }

    /// Saves the budget for `(category, month)`: updates the limit when a
    /// row already exists, creates one otherwise. The backend does not
    /// enforce that uniqueness itself.
    pub async fn set_budget(
        &mut self,
        category: &str,
        month: MonthKey,
        limit_minor: i64,
    ) -> Result<Budget> {
        validate_budget(category, limit_minor)?;
        let month_raw = month.to_string();
        let existing = self
            .snapshot()
            .await?
            .budgets
            .iter()
            .find(|budget| budget.category == category && budget.month == month_raw)
            .map(|budget| budget.id);

        let saved = match existing {
            Some(id) => {
                let patch = BudgetUpdate {
                    monthly_limit_minor: Some(limit_minor),
                    ..BudgetUpdate::default()
                };
                self.client.update_budget(id, &patch).await?
            }
            None => {
                let payload = BudgetNew {
                    category: category.to_string(),
                    monthly_limit_minor: limit_minor,
                    month: month_raw,
                    spent_minor: 0,
                    created_at: Utc::now(),
                };
                self.client.create_budget(&payload).await?
            }
        };
        tracing::info!("saved budget {} for {} {}", saved.id, saved.category, saved.month);
        self.invalidate();
        Ok(saved)
    }

    pub async fn remove_budget(&mut self, id: i64) -> Result<()> {
        self.client.delete_budget(id).await?;
        tracing::info!("deleted budget {id}");
        self.invalidate();
        Ok(())
    }

    async fn known_categories(&mut self) -> Result<Vec<String>> {
        Ok(self.snapshot().await?.categories.clone())
    }
}

fn validate_expense(draft: &ExpenseNew, categories: &[String]) -> Result<()> {
    if draft.description.trim().is_empty() {
        return Err(AppError::Validation(
            "description must not be empty".to_string(),
        ));
    }
    if draft.amount_minor <= 0 {
        return Err(AppError::Validation(
            "amount must be greater than zero".to_string(),
        ));
    }
    known_category(&draft.category, categories)
}

fn validate_expense_patch(patch: &ExpenseUpdate, categories: &[String]) -> Result<()> {
    if patch
        .description
        .as_ref()
        .is_some_and(|description| description.trim().is_empty())
    {
        return Err(AppError::Validation(
            "description must not be empty".to_string(),
        ));
    }
    if patch.amount_minor.is_some_and(|amount| amount <= 0) {
        return Err(AppError::Validation(
            "amount must be greater than zero".to_string(),
        ));
    }
    match &patch.category {
        Some(category) => known_category(category, categories),
        None => Ok(()),
    }
}

fn validate_budget(category: &str, limit_minor: i64) -> Result<()> {
    if category.trim().is_empty() {
        return Err(AppError::Validation(
            "category must not be empty".to_string(),
        ));
    }
    if limit_minor <= 0 {
        return Err(AppError::Validation(
            "monthly limit must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn known_category(category: &str, categories: &[String]) -> Result<()> {
    if categories.iter().any(|known| known == category) {
        return Ok(());
    }
    Err(AppError::Validation(format!(
        "unknown category {category:?}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(description: &str, amount_minor: i64, category: &str) -> ExpenseNew {
        ExpenseNew {
            description: description.to_string(),
            amount_minor,
            category: category.to_string(),
            date: "2025-08-14".parse().expect("valid date"),
        }
    }

    fn categories() -> Vec<String> {
        vec!["Food".to_string(), "Transport".to_string()]
    }

    #[test]
    fn snapshots_age_out_after_the_ttl() {
        let past = Instant::now()
            .checked_sub(Duration::from_secs(600))
            .expect("clock should allow ten minutes of history");
        let snapshot = Snapshot {
            expenses: vec![],
            budgets: vec![],
            categories: vec![],
            fetched_at: past,
        };
        assert!(snapshot.is_stale(SNAPSHOT_TTL));

        let fresh = Snapshot {
            fetched_at: Instant::now(),
            ..snapshot
        };
        assert!(!fresh.is_stale(SNAPSHOT_TTL));
    }

    #[test]
    fn blank_descriptions_are_rejected() {
        let err = validate_expense(&draft("   ", 1250, "Food"), &categories());
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        assert!(validate_expense(&draft("Lunch", 0, "Food"), &categories()).is_err());
        assert!(validate_expense(&draft("Lunch", -500, "Food"), &categories()).is_err());
        assert!(validate_expense(&draft("Lunch", 1, "Food"), &categories()).is_ok());
    }

    #[test]
    fn drafts_must_use_a_known_category() {
        let err = validate_expense(&draft("Lunch", 1250, "Cinema"), &categories());
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn patches_only_validate_the_fields_they_carry() {
        assert!(validate_expense_patch(&ExpenseUpdate::default(), &[]).is_ok());

        let patch = ExpenseUpdate {
            description: Some(String::new()),
            ..ExpenseUpdate::default()
        };
        assert!(validate_expense_patch(&patch, &categories()).is_err());

        let patch = ExpenseUpdate {
            category: Some("Cinema".to_string()),
            ..ExpenseUpdate::default()
        };
        assert!(validate_expense_patch(&patch, &categories()).is_err());
    }

    #[test]
    fn budget_limits_must_be_positive() {
        assert!(validate_budget("Food", 0).is_err());
        assert!(validate_budget("Food", -1).is_err());
        assert!(validate_budget("", 50_000).is_err());
        assert!(validate_budget("Food", 50_000).is_ok());
    }
}
