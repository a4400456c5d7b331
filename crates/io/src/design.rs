// Design document dispatch by file extension

use std::path::Path;

use paramsync_engine::ParameterStore;

/// On-disk representation of a design's parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignFormat {
    /// SQLite `.design` file
    Native,
    /// `.json` document
    Json,
}

impl DesignFormat {
    /// `.json` selects JSON; anything else is the native format.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Native,
        }
    }
}

pub fn load(path: &Path) -> Result<ParameterStore, String> {
    match DesignFormat::from_path(path) {
        DesignFormat::Native => crate::native::load(path),
        DesignFormat::Json => crate::json::load(path),
    }
}

pub fn save(store: &ParameterStore, path: &Path) -> Result<(), String> {
    match DesignFormat::from_path(path) {
        DesignFormat::Native => crate::native::save(store, path),
        DesignFormat::Json => crate::json::save(store, path),
    }
}
