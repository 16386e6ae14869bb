use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Directory exported files are written to. `None` means the user's
    /// download directory.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    #[serde(default = "default_text_export_name")]
    pub text_export_name: String,

    #[serde(default = "default_markup_export_name")]
    pub markup_export_name: String,

    /// Open an exported file with the system handler after writing it
    #[serde(default)]
    pub open_after_export: bool,

    #[serde(default = "default_preview_enabled")]
    pub preview_enabled: bool,

    #[serde(default = "default_window_width")]
    pub window_width: i32,

    #[serde(default = "default_window_height")]
    pub window_height: i32,
}

fn default_text_export_name() -> String {
    "registration_form.txt".to_string()
}

fn default_markup_export_name() -> String {
    "generated_form.html".to_string()
}

fn default_preview_enabled() -> bool {
    true
}

fn default_window_width() -> i32 {
    1100
}

fn default_window_height() -> i32 {
    700
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            export_dir: None,
            text_export_name: default_text_export_name(),
            markup_export_name: default_markup_export_name(),
            open_after_export: false,
            preview_enabled: default_preview_enabled(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

impl AppSettings {
    /// Resolve where exports go
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(config_path: &Path) -> Self {
        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist, use defaults
                let default = Self::default();
                // Try to save defaults for next time
                if let Err(e) = default.save_to(config_path) {
                    tracing::debug!("Could not write default settings: {}", e);
                }
                default
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), AppError> {
        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(config_path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("formforge");
        path.push("settings.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.text_export_name, "registration_form.txt");
        assert_eq!(settings.markup_export_name, "generated_form.html");
        assert!(settings.export_dir.is_none());
        assert!(!settings.open_after_export);
        assert!(settings.preview_enabled);
    }

    #[test]
    fn test_partial_config() {
        // Simulate old config missing new fields
        let json = r#"{"open_after_export": true}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert!(settings.open_after_export);
        assert_eq!(settings.markup_export_name, "generated_form.html");
        assert_eq!(settings.window_width, 1100);
    }

    #[test]
    fn test_explicit_export_dir_wins() {
        let settings = AppSettings {
            export_dir: Some(PathBuf::from("/srv/forms")),
            ..Default::default()
        };
        assert_eq!(settings.export_dir(), PathBuf::from("/srv/forms"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = AppSettings {
            text_export_name: "answers.txt".to_string(),
            preview_enabled: false,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();

        let loaded = AppSettings::load_from(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let loaded = AppSettings::load_from(&path);
        assert_eq!(loaded, AppSettings::default());
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
    }
}
