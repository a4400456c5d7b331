// Session state remembered between runs
// Stored in <config dir>/paramsync/session.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    /// CSV file of the last import, reused by quick import
    pub last_import: Option<PathBuf>,
    /// When the last import happened (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_import_at: Option<String>,
}

impl Session {
    pub fn path() -> PathBuf {
        crate::config_dir().join("session.json")
    }

    /// Load the session; a missing or unreadable file is an empty session.
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                log::warn!("ignoring unreadable session file {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Remember a file as the last import, stamped with the current time.
    pub fn record_import(&mut self, file: &Path) {
        let file = fs::canonicalize(file).unwrap_or_else(|_| file.to_path_buf());
        self.last_import = Some(file);
        self.last_import_at = Some(chrono::Utc::now().to_rfc3339());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_session_is_empty() {
        let dir = tempdir().unwrap();
        let session = Session::load_from(&dir.path().join("session.json"));
        assert!(session.last_import.is_none());
    }

    #[test]
    fn test_record_and_reload() {
        let dir = tempdir().unwrap();
        let csv = dir.path().join("params.csv");
        fs::write(&csv, "").unwrap();
        let path = dir.path().join("state").join("session.json");

        let mut session = Session::default();
        session.record_import(&csv);
        session.save_to(&path).unwrap();

        let loaded = Session::load_from(&path);
        assert_eq!(loaded, session);
        assert_eq!(loaded.last_import.unwrap(), fs::canonicalize(&csv).unwrap());
        assert!(chrono::DateTime::parse_from_rfc3339(loaded.last_import_at.as_deref().unwrap()).is_ok());
    }

    #[test]
    fn test_corrupt_session_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "[1, 2").unwrap();
        assert_eq!(Session::load_from(&path), Session::default());
    }
}
