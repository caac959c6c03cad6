use std::{fmt, fs, path::Path};

use engine::MonthKey;
use serde::{Deserialize, Serialize};

use crate::error::Result;

const DEFAULT_STATE_PATH: &str = "config/spese_state.json";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

/// The slice of state worth keeping across runs. Everything else is
/// rebuilt from the backend on startup.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
}

impl Preferences {
    pub fn load(path: &str) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let parent = Path::new(path).parent();
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }
}

/// In-memory session state. Only `preferences` survives a restart.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppState {
    pub preferences: Preferences,
    pub selected_month: Option<MonthKey>,
}

impl AppState {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            preferences,
            selected_month: None,
        }
    }

    pub fn toggle_theme(&mut self) {
        self.preferences.theme = self.preferences.theme.toggled();
    }

    pub fn select_month(&mut self, month: MonthKey) {
        self.selected_month = Some(month);
    }
}

pub fn default_state_path() -> &'static str {
    DEFAULT_STATE_PATH
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_state_path(tag: &str) -> String {
        std::env::temp_dir()
            .join(format!("spese_state_{tag}_{}.json", std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn a_missing_file_falls_back_to_the_default_theme() {
        let preferences =
            Preferences::load(&temp_state_path("missing")).expect("missing file is not an error");
        assert_eq!(preferences.theme, Theme::Light);
    }

    #[test]
    fn saved_preferences_can_be_read_back() {
        let path = temp_state_path("saved");
        let saved = Preferences { theme: Theme::Dark };
        saved.save(&path).expect("save should succeed");
        let loaded = Preferences::load(&path).expect("load should succeed");
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.theme, Theme::Dark);
    }

    #[test]
    fn the_wire_format_stays_lowercase() {
        let payload = serde_json::to_string(&Preferences { theme: Theme::Dark })
            .expect("preferences should serialize");
        assert_eq!(payload, r#"{"theme":"dark"}"#);
    }

    #[test]
    fn toggling_flips_between_light_and_dark() {
        let mut state = AppState::default();
        state.toggle_theme();
        assert_eq!(state.preferences.theme, Theme::Dark);
        state.toggle_theme();
        assert_eq!(state.preferences.theme, Theme::Light);
    }

    #[test]
    fn month_selection_is_session_state() {
        let august = MonthKey::new(2025, 8).expect("valid month");
        let mut state = AppState::new(Preferences::default());
        state.select_month(august);
        assert_eq!(state.selected_month, Some(august));
    }
}
