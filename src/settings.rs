//! Player preferences
//!
//! Persisted separately from the leaderboard.

use serde::{Deserialize, Serialize};

use crate::platform::storage;

/// Player preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play in fullscreen (uses the longer gripper reach)
    pub fullscreen: bool,
    /// Show FPS counter
    pub show_fps: bool,

    // === Score form ===
    /// Last name entered, to prefill the next submission
    pub player_name: String,
    pub company_name: String,
}

impl Settings {
    /// Remember the names from a successful submission
    pub fn remember_names(&mut self, name: &str, company: &str) -> bool {
        let (name, company) = (name.trim(), company.trim());
        if self.player_name == name && self.company_name == company {
            return false;
        }
        self.player_name = name.to_string();
        self.company_name = company.to_string();
        true
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "lifter_arcade_settings";

    /// Load settings from LocalStorage, falling back to defaults
    pub fn load() -> Self {
        match storage::load_json(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage
    pub fn save(&self) {
        if let Err(e) = storage::save_json(Self::STORAGE_KEY, self) {
            log::warn!("Could not save settings: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let s: Settings = serde_json::from_str(r#"{"fullscreen":true}"#).unwrap();
        assert!(s.fullscreen);
        assert!(!s.show_fps);
        assert!(s.player_name.is_empty());
    }

    #[test]
    fn test_remember_names_reports_change() {
        let mut s = Settings::default();
        assert!(s.remember_names(" Ada ", "Acme"));
        assert_eq!(s.player_name, "Ada");
        assert!(!s.remember_names("Ada", "Acme "));
    }
}
