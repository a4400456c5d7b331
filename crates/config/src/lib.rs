// Configuration loading

use std::path::PathBuf;

pub mod session;
pub mod settings;

/// Overrides the configuration directory (used by tests and portable installs).
pub const CONFIG_DIR_ENV: &str = "PSYNC_CONFIG_DIR";

/// Directory holding settings.json and session.json
pub fn config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("paramsync")
}
