// JSON design documents
//
// {"format_version": 1, "parameters": [{"name": ..., "unit": ..., "expression": ..., "comment": ...}]}

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use paramsync_engine::{Parameter, ParameterStore};

use crate::NATIVE_FORMAT_VERSION;

#[derive(Debug, Serialize, Deserialize)]
struct DesignDocument {
    #[serde(default = "default_version")]
    format_version: u32,
    #[serde(default)]
    parameters: Vec<Parameter>,
}

fn default_version() -> u32 {
    NATIVE_FORMAT_VERSION
}

pub fn save(store: &ParameterStore, path: &Path) -> Result<(), String> {
    let file = File::create(path).map_err(|e| e.to_string())?;
    let mut writer = BufWriter::new(file);

    let doc = DesignDocument {
        format_version: NATIVE_FORMAT_VERSION,
        parameters: store.iter().cloned().collect(),
    };

    serde_json::to_writer_pretty(&mut writer, &doc).map_err(|e| e.to_string())?;
    writer.flush().map_err(|e| e.to_string())?;

    log::debug!("saved {} parameters to {}", store.len(), path.display());
    Ok(())
}

pub fn load(path: &Path) -> Result<ParameterStore, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    from_str(&content)
}

fn from_str(content: &str) -> Result<ParameterStore, String> {
    let doc: DesignDocument = serde_json::from_str(content).map_err(|e| e.to_string())?;

    if doc.format_version > NATIVE_FORMAT_VERSION {
        return Err(format!(
            "design file format version {} is newer than supported version {}",
            doc.format_version, NATIVE_FORMAT_VERSION
        ));
    }

    ParameterStore::from_parameters(doc.parameters).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramsync_engine::ParameterHost;
    use tempfile::tempdir;

    #[test]
    fn test_json_design_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("design.json");

        let mut store = ParameterStore::new();
        store.create_parameter("width", "10 mm", "mm", "outer").unwrap();
        store.create_parameter("count", "4", "", " ").unwrap();

        save(&store, &path).unwrap();
        let loaded = load(&path).unwrap();

        let params: Vec<&Parameter> = loaded.iter().collect();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0], store.get("width").unwrap());
        assert_eq!(params[1].unit(), None);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_save_reports_failed_flush() {
        // Small documents stay in the buffer until the final flush
        let mut store = ParameterStore::new();
        store.create_parameter("width", "10 mm", "mm", "outer").unwrap();
        assert!(save(&store, Path::new("/dev/full")).is_err());
    }

    #[test]
    fn test_hand_written_document() {
        let store = from_str(
            r#"{"parameters": [
                {"name": "height", "expression": "20 mm", "unit": "mm"},
                {"name": "ratio", "expression": "height / 4", "comment": "derived"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(store.get("height").unwrap().comment, "");
        assert_eq!(store.get("ratio").unwrap().comment, "derived");
    }

    #[test]
    fn test_rejects_newer_version() {
        let err = from_str(r#"{"format_version": 99, "parameters": []}"#).unwrap_err();
        assert!(err.contains("newer"), "{err}");
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = from_str(
            r#"{"parameters": [{"name": "a", "expression": "1"}, {"name": "a", "expression": "2"}]}"#,
        )
        .unwrap_err();
        assert!(err.contains("already exists"), "{err}");
    }
}
