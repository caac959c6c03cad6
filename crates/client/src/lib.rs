use std::time::Duration;

use api_types::{
    budget::{Budget, BudgetNew, BudgetUpdate},
    expense::{Expense, ExpenseNew, ExpenseUpdate},
};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("resource not found")]
    NotFound,
    #[error("{status}: {message}")]
    Server { status: StatusCode, message: String },
}

impl ApiError {
    /// Transient failures worth another read attempt. Anything the backend
    /// rejected deterministically is not.
    fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Server { status, .. } => status.is_server_error(),
            ApiError::InvalidBaseUrl(_) | ApiError::NotFound => false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Bounds the automatic retry of read requests.
///
/// Mutations are never retried; a failed create/update/delete surfaces
/// immediately so the caller can resubmit.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Attempts per read, including the first.
    pub max_attempts: u32,
    /// First backoff delay; doubles after every failed attempt.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// Delay to sleep after failed attempt number `attempt` (1-based).
    fn backoff_after(self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Server-side list narrowing (`?category=&month=`).
///
/// The backend filters for convenience; the engine can equivalently
/// filter client-side.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
}

impl ListQuery {
    pub fn all() -> Self {
        Self::default()
    }
}

/// Async client for the expense store's REST resources.
#[derive(Clone, Debug)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl StoreClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_retry(base_url, RetryPolicy::default())
    }

    pub fn with_retry(base_url: &str, retry: RetryPolicy) -> Result<Self> {
        // Parsed only to reject junk early; requests use the string form.
        Url::parse(base_url).map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.to_string(),
            retry,
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn list_expenses(&self, query: &ListQuery) -> Result<Vec<Expense>> {
        self.get_json("/expenses", query).await
    }

    pub async fn create_expense(&self, payload: &ExpenseNew) -> Result<Expense> {
        self.post_json("/expenses", payload).await
    }

    pub async fn update_expense(&self, id: i64, payload: &ExpenseUpdate) -> Result<Expense> {
        self.patch_json(&format!("/expenses/{id}"), payload).await
    }

    pub async fn delete_expense(&self, id: i64) -> Result<()> {
        self.delete(&format!("/expenses/{id}")).await
    }

    pub async fn list_budgets(&self, query: &ListQuery) -> Result<Vec<Budget>> {
        self.get_json("/budgets", query).await
    }

    pub async fn create_budget(&self, payload: &BudgetNew) -> Result<Budget> {
        self.post_json("/budgets", payload).await
    }

    pub async fn update_budget(&self, id: i64, payload: &BudgetUpdate) -> Result<Budget> {
        self.patch_json(&format!("/budgets/{id}"), payload).await
    }

    pub async fn delete_budget(&self, id: i64) -> Result<()> {
        self.delete(&format!("/budgets/{id}")).await
    }

    pub async fn list_categories(&self) -> Result<Vec<String>> {
        self.get_json("/categories", &ListQuery::all()).await
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> Result<T> {
        let mut attempt = 1;
        loop {
            match self.try_get(path, query).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.retry.max_attempts && err.is_retryable() => {
                    let delay = self.retry.backoff_after(attempt);
                    tracing::warn!(
                        "GET {path} attempt {attempt} failed ({err}), retrying in {delay:?}"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn try_get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> Result<T> {
        tracing::debug!("GET {}", self.url(path));
        let resp = self.http.get(self.url(path)).query(query).send().await?;
        Self::decode(resp).await
    }

    async fn post_json<TReq, TResp>(&self, path: &str, body: &TReq) -> Result<TResp>
    where
        TReq: Serialize + ?Sized,
        TResp: for<'de> Deserialize<'de>,
    {
        tracing::debug!("POST {}", self.url(path));
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(resp).await
    }

    async fn patch_json<TReq, TResp>(&self, path: &str, body: &TReq) -> Result<TResp>
    where
        TReq: Serialize + ?Sized,
        TResp: for<'de> Deserialize<'de>,
    {
        tracing::debug!("PATCH {}", self.url(path));
        let resp = self.http.patch(self.url(path)).json(body).send().await?;
        Self::decode(resp).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        tracing::debug!("DELETE {}", self.url(path));
        let resp = self.http.delete(self.url(path)).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::error_from(status, resp).await)
    }

    async fn decode<T: for<'de> Deserialize<'de>>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }
        Err(Self::error_from(status, resp).await)
    }

    async fn error_from(status: StatusCode, resp: reqwest::Response) -> ApiError {
        if status == StatusCode::NOT_FOUND {
            return ApiError::NotFound;
        }
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => "server error".to_string(),
        };
        ApiError::Server { status, message }
    }
}
