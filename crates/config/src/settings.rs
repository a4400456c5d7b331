// Application settings
// Loaded from <config dir>/paramsync/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log filter used when PSYNC_LOG is not set (e.g. "warn", "info", "paramsync_sync=debug")
    #[serde(rename = "log.level")]
    pub log_level: String,

    /// Print a confirmation after a (non-quick) import
    #[serde(rename = "import.confirm")]
    pub import_confirm: bool,

    /// Print the written file name after an export
    #[serde(rename = "export.confirm")]
    pub export_confirm: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            import_confirm: true,
            export_confirm: true,
        }
    }
}

const DEFAULT_SETTINGS_FILE: &str = r#"{
    // Log filter when PSYNC_LOG is unset: "error", "warn", "info", "debug"
    "log.level": "warn",

    // Confirmation messages
    "import.confirm": true,
    "export.confirm": true
}
"#;

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        crate::config_dir().join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file(&path);
            return settings;
        }

        Self::load_from(&path)
    }

    /// Load settings from a specific file, falling back to defaults on any error.
    ///
    /// Logging is not set up yet when settings load, so problems go to stderr.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("Error parsing {}: {}", path.display(), e);
                    eprintln!("Using default settings");
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON, ignoring lines starting with //
    pub fn parse(contents: &str) -> Result<Self, String> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        serde_json::from_str(&cleaned).map_err(|e| e.to_string())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Create default settings file with comments
    fn create_default_file(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Error creating config directory: {}", e);
                return;
            }
        }

        if let Err(e) = fs::write(path, DEFAULT_SETTINGS_FILE) {
            eprintln!("Error writing default settings.json: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_file_parses_to_defaults() {
        assert_eq!(Settings::parse(DEFAULT_SETTINGS_FILE).unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let s = Settings::parse(r#"{ "import.confirm": false }"#).unwrap();
        assert!(!s.import_confirm);
        assert!(s.export_confirm);
        assert_eq!(s.log_level, "warn");
    }

    #[test]
    fn test_comment_lines_ignored() {
        let s = Settings::parse("{\n  // quiet\n  \"log.level\": \"debug\"\n}").unwrap();
        assert_eq!(s.log_level, "debug");
    }

    #[test]
    fn test_broken_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            log_level: "info".into(),
            import_confirm: false,
            export_confirm: true,
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
    }
}
