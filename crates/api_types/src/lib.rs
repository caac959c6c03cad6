use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub mod expense {
    use super::*;

    /// An expense as stored by the backend.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Expense {
        pub id: i64,
        pub description: String,
        /// Positive amount in integer cents.
        pub amount_minor: i64,
        pub category: String,
        /// Calendar date (`YYYY-MM-DD` in JSON).
        pub date: NaiveDate,
    }

    /// Request body for creating an expense. The backend assigns the id.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub description: String,
        pub amount_minor: i64,
        pub category: String,
        pub date: NaiveDate,
    }

    /// PATCH body for an expense.
    ///
    /// Absent fields are not serialized, so a patch never clears what it
    /// does not mention.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub amount_minor: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub date: Option<NaiveDate>,
    }
}

pub mod budget {
    use super::*;

    /// A per-category monthly budget as stored by the backend.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Budget {
        pub id: i64,
        pub category: String,
        /// Positive limit in integer cents.
        pub monthly_limit_minor: i64,
        /// Budget period, `YYYY-MM`.
        pub month: String,
        /// Cached spend written at creation time. Display only; progress
        /// is always recomputed from expenses.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub spent_minor: Option<i64>,
        pub created_at: DateTime<Utc>,
    }

    /// Request body for creating a budget. The backend assigns the id.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetNew {
        pub category: String,
        pub monthly_limit_minor: i64,
        pub month: String,
        /// Written as zero on create; never read back for computation.
        pub spent_minor: i64,
        pub created_at: DateTime<Utc>,
    }

    /// PATCH body for a budget.
    ///
    /// Absent fields are not serialized, so a patch never clears what it
    /// does not mention.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct BudgetUpdate {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub monthly_limit_minor: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub month: Option<String>,
    }
}
