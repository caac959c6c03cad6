use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("api error: {0}")]
    Api(#[from] client::ApiError),
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("month error: {0}")]
    Month(#[from] engine::ParseMonthKeyError),
    #[error("validation error: {0}")]
    Validation(String),
}
