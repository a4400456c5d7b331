// Native .design format using SQLite

use std::path::Path;

use rusqlite::{Connection, params};

use paramsync_engine::{Parameter, ParameterStore};

use crate::NATIVE_FORMAT_VERSION;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS parameters (
    position INTEGER NOT NULL,      -- enumeration order
    name TEXT PRIMARY KEY,
    unit TEXT,                      -- NULL = no unit defined
    expression TEXT NOT NULL,
    comment TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

pub fn save(store: &ParameterStore, path: &Path) -> Result<(), String> {
    // Delete existing file if present (SQLite will create fresh)
    if path.exists() {
        std::fs::remove_file(path).map_err(|e| e.to_string())?;
    }

    let mut conn = Connection::open(path).map_err(|e| e.to_string())?;

    conn.execute_batch(SCHEMA).map_err(|e| e.to_string())?;

    conn.execute(
        "INSERT INTO meta (key, value) VALUES (?1, ?2)",
        params!["format_version", NATIVE_FORMAT_VERSION.to_string()],
    ).map_err(|e| e.to_string())?;

    let tx = conn.transaction().map_err(|e| e.to_string())?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO parameters (position, name, unit, expression, comment) VALUES (?1, ?2, ?3, ?4, ?5)"
        ).map_err(|e| e.to_string())?;

        for (position, param) in store.iter().enumerate() {
            stmt.execute(params![
                position as i64,
                &param.name,
                param.unit(),
                &param.expression,
                &param.comment,
            ]).map_err(|e| e.to_string())?;
        }
    }
    tx.commit().map_err(|e| e.to_string())?;

    log::debug!("saved {} parameters to {}", store.len(), path.display());
    Ok(())
}

pub fn load(path: &Path) -> Result<ParameterStore, String> {
    if !path.exists() {
        return Err(format!("design file not found: {}", path.display()));
    }

    let conn = Connection::open(path).map_err(|e| e.to_string())?;

    let version: u32 = conn
        .query_row("SELECT value FROM meta WHERE key = 'format_version'", [], |row| {
            let s: String = row.get(0)?;
            Ok(s.parse().unwrap_or(0))
        })
        .map_err(|e| format!("not a design file ({}): {}", path.display(), e))?;

    if version > NATIVE_FORMAT_VERSION {
        return Err(format!(
            "design file format version {} is newer than supported version {}",
            version, NATIVE_FORMAT_VERSION
        ));
    }

    let mut stmt = conn
        .prepare("SELECT name, unit, expression, comment FROM parameters ORDER BY position")
        .map_err(|e| e.to_string())?;

    let param_iter = stmt
        .query_map([], |row| {
            Ok(Parameter {
                name: row.get(0)?,
                unit: row.get(1)?,
                expression: row.get(2)?,
                comment: row.get(3)?,
            })
        })
        .map_err(|e| e.to_string())?;

    let mut params = Vec::new();
    for param in param_iter {
        params.push(param.map_err(|e| e.to_string())?);
    }

    ParameterStore::from_parameters(params).map_err(|e| e.to_string())
}
