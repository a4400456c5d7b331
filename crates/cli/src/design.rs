//! `psync init` / `psync list` and shared design document helpers.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use paramsync_engine::ParameterStore;
use paramsync_io::design;

use crate::CliError;

pub fn load_design(path: &Path) -> Result<ParameterStore, CliError> {
    design::load(path).map_err(|e| {
        CliError::design(format!("cannot load design {}: {}", path.display(), e))
            .with_hint(format!("create one with: psync init {}", path.display()))
    })
}

pub fn save_design(store: &ParameterStore, path: &Path) -> Result<(), CliError> {
    design::save(store, path)
        .map_err(|e| CliError::design(format!("cannot save design {}: {}", path.display(), e)))
}

pub fn cmd_init(path: PathBuf, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::args(format!("{} already exists", path.display()))
            .with_hint("use --force to replace it"));
    }
    save_design(&ParameterStore::new(), &path)?;
    log::info!("created empty design {}", path.display());
    Ok(())
}

pub fn cmd_list(path: PathBuf, json: bool) -> Result<(), CliError> {
    let store = load_design(&path)?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if json {
        let params: Vec<_> = store.iter().collect();
        serde_json::to_writer_pretty(&mut handle, &params).map_err(|e| CliError::other(e.to_string()))?;
        writeln!(handle).map_err(|e| CliError::other(e.to_string()))?;
        return Ok(());
    }

    let name_width = store.iter().map(|p| p.name.chars().count()).max().unwrap_or(0).max(4);
    let unit_width = store
        .iter()
        .map(|p| p.unit().unwrap_or("").chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    for p in store.iter() {
        writeln!(
            handle,
            "{:<nw$}  {:<uw$}  {}{}",
            p.name,
            p.unit().unwrap_or(""),
            p.expression,
            if p.comment.trim().is_empty() { String::new() } else { format!("  # {}", p.comment) },
            nw = name_width,
            uw = unit_width,
        )
        .map_err(|e| CliError::other(e.to_string()))?;
    }
    Ok(())
}
