use std::fmt;

use paramsync_engine::HostError;
use paramsync_io::csv::CsvError;

#[derive(Debug)]
pub enum SyncError {
    /// A CSV record has fewer than name, unit and expression. Nothing was applied.
    Parse { line: u64, fields: usize },
    /// CSV text could not be read or written.
    Csv(String),
    /// The host refused a create or update.
    Host { name: String, source: HostError },
    /// IO error (file read, write, etc.).
    Io(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { line, fields } => write!(
                f,
                "line {line}: expected at least 3 fields (name, unit, expression), found {fields}"
            ),
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
            Self::Host { name, source } => write!(f, "host rejected '{name}': {source}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Host { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<CsvError> for SyncError {
    fn from(err: CsvError) -> Self {
        match err {
            CsvError::ShortRow { line, fields } => Self::Parse { line, fields },
            CsvError::Malformed(msg) => Self::Csv(msg),
        }
    }
}
