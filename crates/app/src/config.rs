use engine::MonthKey;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/spese.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub state_path: String,
    /// Month to open the report on, `YYYY-MM`. Unset means the latest
    /// month with recorded expenses.
    pub month: Option<String>,
    /// Where to drop the CSV export. Unset skips the export.
    pub export_path: Option<String>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            state_path: crate::state::default_state_path().to_string(),
            month: None,
            export_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn selected_month(&self) -> Result<Option<MonthKey>> {
        match &self.month {
            Some(raw) => Ok(Some(raw.parse()?)),
            None => Ok(None),
        }
    }
}

pub fn load() -> Result<AppConfig> {
    load_from(DEFAULT_CONFIG_PATH)
}

pub fn load_from(path: &str) -> Result<AppConfig> {
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SPESE"));
    Ok(builder.build()?.try_deserialize()?)
}
