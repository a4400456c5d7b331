use std::collections::HashMap;
use std::path::Path;

use paramsync_engine::{Parameter, ParameterHost};
use paramsync_io::csv::{parse_rows, read_file_as_utf8, write_rows, ParameterRow};

use crate::error::SyncError;
use crate::model::{ExportSummary, ImportPlan, ImportSummary, Mutation};

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Serialize parameters to CSV text, one record per parameter in the given order.
pub fn export_csv(params: &[Parameter]) -> Result<String, SyncError> {
    let rows: Vec<ParameterRow> = params
        .iter()
        .map(|p| {
            if p.unit().is_none() {
                log::debug!("parameter '{}' has no unit, exporting empty unit", p.name);
            }
            ParameterRow::from_parameter(p)
        })
        .collect();
    Ok(write_rows(&rows)?)
}

/// Write every host parameter to `path`, replacing the file if it exists.
pub fn export_to_file<H: ParameterHost + ?Sized>(
    host: &H,
    path: &Path,
) -> Result<ExportSummary, SyncError> {
    let params = host.enumerate_parameters();
    let text = export_csv(&params)?;

    std::fs::write(path, text)
        .map_err(|e| SyncError::Io(format!("cannot write {}: {}", path.display(), e)))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    log::info!("exported {} parameters to {}", params.len(), path.display());

    Ok(ExportSummary {
        path: path.to_path_buf(),
        file_name,
        parameters: params.len(),
    })
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Current (unit, expression, comment) of a name known to the plan.
struct Known<'a> {
    unit: &'a str,
    expression: &'a str,
    comment: &'a str,
}

/// Reconcile CSV text against existing parameters without touching the host.
///
/// Rows are matched by exact name, in file order. A name created by an earlier
/// row counts as existing for later rows. The whole text is parsed before any
/// mutation is produced, so a short row yields an error and no plan.
pub fn plan_import(existing: &[Parameter], csv_text: &str) -> Result<ImportPlan, SyncError> {
    let rows = parse_rows(csv_text)?;

    let mut known: HashMap<&str, Known<'_>> = existing
        .iter()
        .map(|p| {
            (
                p.name.as_str(),
                Known {
                    unit: p.unit().unwrap_or(""),
                    expression: &p.expression,
                    comment: &p.comment,
                },
            )
        })
        .collect();

    let mut mutations = Vec::with_capacity(rows.len());
    for row in &rows {
        let mutation = match known.get(row.name.as_str()) {
            None => Mutation::Create {
                name: row.name.clone(),
                expression: row.expression.clone(),
                unit: row.unit.clone(),
                comment: row.comment.clone(),
            },
            Some(current) => Mutation::Update {
                name: row.name.clone(),
                unit: row.unit.clone(),
                expression: row.expression.clone(),
                comment: row.comment.clone(),
                unchanged: current.unit == row.unit
                    && current.expression == row.expression
                    && current.comment == row.comment,
            },
        };
        known.insert(
            &row.name,
            Known {
                unit: &row.unit,
                expression: &row.expression,
                comment: &row.comment,
            },
        );
        mutations.push(mutation);
    }

    Ok(ImportPlan { mutations })
}

/// Apply a plan in order. Stops at the first host rejection; mutations
/// applied before it stay applied.
pub fn apply_plan<H: ParameterHost + ?Sized>(
    host: &mut H,
    plan: &ImportPlan,
) -> Result<ImportSummary, SyncError> {
    let mut summary = ImportSummary::default();

    for mutation in &plan.mutations {
        log::debug!("{mutation}");
        let result = match mutation {
            Mutation::Create { name, expression, unit, comment } => {
                host.create_parameter(name, expression, unit, comment)
            }
            Mutation::Update { name, unit, expression, comment, .. } => {
                host.update_parameter(name, unit, expression, comment)
            }
        };
        if let Err(source) = result {
            log::warn!(
                "stopped after {} of {} mutations: {}",
                summary.total(),
                plan.mutations.len(),
                source
            );
            return Err(SyncError::Host { name: mutation.name().to_string(), source });
        }
        summary.record(mutation);
    }

    Ok(summary)
}

/// Plan against the host's current parameters, then apply.
pub fn import_csv<H: ParameterHost + ?Sized>(
    host: &mut H,
    csv_text: &str,
) -> Result<ImportSummary, SyncError> {
    let plan = plan_import(&host.enumerate_parameters(), csv_text)?;
    let summary = apply_plan(host, &plan)?;
    log::info!(
        "import finished: {} created, {} updated, {} unchanged",
        summary.created,
        summary.updated,
        summary.unchanged
    );
    Ok(summary)
}

/// Read a CSV file and import it into the host.
pub fn import_file<H: ParameterHost + ?Sized>(
    host: &mut H,
    path: &Path,
) -> Result<ImportSummary, SyncError> {
    let text = read_csv_file(path)?;
    import_csv(host, &text)
}

/// Read a CSV file for planning or import.
pub fn read_csv_file(path: &Path) -> Result<String, SyncError> {
    read_file_as_utf8(path).map_err(|e| SyncError::Io(format!("cannot read {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramsync_engine::{HostError, ParameterStore};

    fn store(params: &[(&str, &str, &str, &str)]) -> ParameterStore {
        let mut store = ParameterStore::new();
        for (name, unit, expression, comment) in params {
            store.create_parameter(name, expression, unit, comment).unwrap();
        }
        store
    }

    #[test]
    fn test_export_csv() {
        let params = vec![
            Parameter::new("width", "10 mm").with_unit("mm").with_comment("outer"),
            Parameter::new("count", "4"),
        ];
        assert_eq!(
            export_csv(&params).unwrap(),
            "\"width\",\"mm\",\"10 mm\",\"outer\"\n\"count\",\"\",\"4\",\"\"\n"
        );
    }

    #[test]
    fn test_plan_create_vs_update() {
        let existing = store(&[("A", "mm", "1 mm", "a"), ("B", "mm", "2 mm", "b")]);
        let plan = plan_import(
            &existing.enumerate_parameters(),
            "\"A\",\"mm\",\"5 mm\",\"a\"\n\"C\",\"\",\"3\",\"c\"\n",
        )
        .unwrap();

        assert_eq!(
            plan.mutations,
            vec![
                Mutation::Update {
                    name: "A".into(),
                    unit: "mm".into(),
                    expression: "5 mm".into(),
                    comment: "a".into(),
                    unchanged: false,
                },
                Mutation::Create {
                    name: "C".into(),
                    expression: "3".into(),
                    unit: "".into(),
                    comment: "c".into(),
                },
            ]
        );
        assert_eq!(plan.creates().count(), 1);
        assert_eq!(plan.updates().count(), 1);
    }

    #[test]
    fn test_plan_matches_names_exactly() {
        let existing = store(&[("width", "", "1", " ")]);
        let plan = plan_import(&existing.enumerate_parameters(), "Width,,2\n").unwrap();
        assert!(plan.mutations[0].is_create());
    }

    #[test]
    fn test_plan_repeated_new_name_becomes_update() {
        let plan = plan_import(&[], "n,,1\nn,,2\nn,,2\n").unwrap();
        assert!(plan.mutations[0].is_create());
        assert!(matches!(plan.mutations[1], Mutation::Update { unchanged: false, .. }));
        assert!(plan.mutations[2].is_noop());
    }

    #[test]
    fn test_plan_missing_unit_matches_empty_unit() {
        let existing = vec![Parameter::new("count", "4").with_comment("c")];
        let plan = plan_import(&existing, "count,,4,c\n").unwrap();
        assert!(plan.is_noop());
    }

    #[test]
    fn test_plan_is_deterministic() {
        let existing = store(&[("a", "", "1", " "), ("b", "", "2", " ")]);
        let text = "b,,5\nz,,1\na,,1\ny,mm,2 mm\n";
        let first = plan_import(&existing.enumerate_parameters(), text).unwrap();
        for _ in 0..5 {
            assert_eq!(plan_import(&existing.enumerate_parameters(), text).unwrap(), first);
        }
    }

    #[test]
    fn test_short_row_applies_nothing() {
        let mut host = store(&[("a", "", "1", " ")]);
        let before = host.enumerate_parameters();

        let err = import_csv(&mut host, "a,,9\nnew,,1\n\"onlyname\",\"onlyunit\"\n").unwrap_err();
        assert!(matches!(err, SyncError::Parse { fields: 2, .. }), "{err}");
        assert_eq!(host.enumerate_parameters(), before);
    }

    #[test]
    fn test_host_rejection_stops_and_keeps_earlier() {
        let mut host = store(&[]);
        let err = import_csv(&mut host, "a,,1\nb,,(2\nc,,3\n").unwrap_err();

        match err {
            SyncError::Host { name, source } => {
                assert_eq!(name, "b");
                assert!(matches!(source, HostError::InvalidExpression { .. }));
            }
            other => panic!("expected host error, got {other}"),
        }
        assert!(host.contains("a"));
        assert!(!host.contains("b"));
        assert!(!host.contains("c"));
    }

    #[test]
    fn test_import_summary_counts() {
        let mut host = store(&[("a", "", "1", "x"), ("b", "", "2", "y")]);
        let summary = import_csv(&mut host, "a,,1,x\nb,,3,y\nc,,4\n").unwrap();
        assert_eq!(summary, ImportSummary { created: 1, updated: 1, unchanged: 1 });
        assert_eq!(host.get("c").unwrap().comment, " ");
    }
}
