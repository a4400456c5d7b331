//! `psync import`, `psync quick-import` and `psync plan`.

use std::path::{Path, PathBuf};

use serde::Serialize;

use paramsync_config::session::Session;
use paramsync_engine::ParameterHost;
use paramsync_sync::{apply_plan, plan_import, read_csv_file, ImportSummary, Mutation, SyncError};

use crate::design::{load_design, save_design};
use crate::exit_codes::EXIT_NO_PREVIOUS_IMPORT;
use crate::CliError;

pub fn cmd_import(design: PathBuf, csv: PathBuf, dry_run: bool, quiet: bool) -> Result<(), CliError> {
    if !dry_run {
        // Remembered even if the import fails, so a fixed file can be quick-imported
        let mut session = Session::load();
        session.record_import(&csv);
        if let Err(e) = session.save() {
            log::warn!("cannot save session: {}", e);
        }
    }

    let summary = run_import(&design, &csv, dry_run)?;

    if !quiet {
        print_summary(&summary, dry_run);
        if !dry_run {
            println!("Finished reading and updating parameters");
        }
    }
    Ok(())
}

pub fn cmd_quick_import(design: PathBuf) -> Result<(), CliError> {
    let session = Session::load();
    let Some(csv) = session.last_import else {
        return Err(CliError::new(EXIT_NO_PREVIOUS_IMPORT, "no previous import to repeat")
            .with_hint(format!("run: psync import {} <file.csv>", design.display())));
    };

    log::info!("quick import from {}", csv.display());
    run_import(&design, &csv, false)?;
    Ok(())
}

#[derive(Serialize)]
struct PlanOutput<'a> {
    design: &'a Path,
    csv: &'a Path,
    summary: ImportSummary,
    mutations: &'a [Mutation],
}

pub fn cmd_plan(design: PathBuf, csv: PathBuf, json: bool) -> Result<(), CliError> {
    let store = load_design(&design)?;
    let text = read_csv_file(&csv).map_err(CliError::sync)?;
    let plan = plan_import(&store.enumerate_parameters(), &text).map_err(CliError::sync)?;

    if json {
        let output = PlanOutput {
            design: &design,
            csv: &csv,
            summary: plan.summary(),
            mutations: &plan.mutations,
        };
        let out = serde_json::to_string_pretty(&output).map_err(|e| CliError::other(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    for mutation in &plan.mutations {
        println!("{}", mutation);
    }
    print_summary(&plan.summary(), true);
    Ok(())
}

/// Load the design, apply the CSV, and save unless `dry_run`.
///
/// When the host rejects a row, the rows before it have been applied; the
/// design is saved in that state before the error is returned.
fn run_import(design: &Path, csv: &Path, dry_run: bool) -> Result<ImportSummary, CliError> {
    let mut store = load_design(design)?;
    let text = read_csv_file(csv).map_err(CliError::sync)?;
    let plan = plan_import(&store.enumerate_parameters(), &text).map_err(CliError::sync)?;

    if dry_run {
        return Ok(plan.summary());
    }

    match apply_plan(&mut store, &plan) {
        Ok(summary) => {
            save_design(&store, design)?;
            log::info!(
                "imported {} into {}: {} created, {} updated, {} unchanged",
                csv.display(),
                design.display(),
                summary.created,
                summary.updated,
                summary.unchanged
            );
            Ok(summary)
        }
        Err(err @ SyncError::Host { .. }) => {
            save_design(&store, design)?;
            Err(CliError::sync(err))
        }
        Err(err) => Err(CliError::sync(err)),
    }
}

fn print_summary(summary: &ImportSummary, dry_run: bool) {
    let verb = if dry_run { "would be " } else { "" };
    println!(
        "{} {verb}created, {} {verb}updated, {} unchanged",
        summary.created, summary.updated, summary.unchanged
    );
}
