//! `psync export` - write a design's parameters to CSV.

use std::path::PathBuf;

use paramsync_sync::export_to_file;

use crate::design::load_design;
use crate::CliError;

pub fn cmd_export(design: PathBuf, csv: PathBuf, quiet: bool) -> Result<(), CliError> {
    let store = load_design(&design)?;
    let summary = export_to_file(&store, &csv).map_err(CliError::sync)?;

    if !quiet {
        println!("Parameters written to {}", summary.file_name);
    }
    Ok(())
}
