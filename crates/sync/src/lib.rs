//! `paramsync-sync` - CSV import/export of design parameters.
//!
//! Engine crate: works against any [`ParameterHost`](paramsync_engine::ParameterHost).
//! Export serializes the host's parameters; import reconciles CSV rows with
//! existing parameters by exact name (update in place, else create).

pub mod engine;
pub mod error;
pub mod model;

pub use engine::{apply_plan, export_csv, export_to_file, import_csv, import_file, plan_import, read_csv_file};
pub use error::SyncError;
pub use model::{ExportSummary, ImportPlan, ImportSummary, Mutation};
