// CSV parameter import/export
//
// One record per parameter: "name","unit","expression","comment".
// Writer always quotes all four fields; reader accepts 3 or 4 fields.

use std::fmt;
use std::io::Read;
use std::path::Path;

use paramsync_engine::Parameter;

/// Substituted for a missing or empty comment; hosts reject empty comment strings.
pub const COMMENT_PLACEHOLDER: &str = " ";

/// Minimum fields per record: name, unit, expression.
pub const MIN_FIELDS: usize = 3;

/// A serialized parameter, as one CSV record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterRow {
    pub name: String,
    pub unit: String,
    pub expression: String,
    pub comment: String,
}

impl ParameterRow {
    /// Serialize a parameter. A parameter without a readable unit gets an empty unit field.
    pub fn from_parameter(param: &Parameter) -> Self {
        let unit = match param.unit() {
            Some(unit) => unit.to_string(),
            None => String::new(),
        };
        Self {
            name: param.name.clone(),
            unit,
            expression: param.expression.clone(),
            comment: param.comment.clone(),
        }
    }

    fn from_record(record: &csv::StringRecord) -> Self {
        let comment = match record.get(3) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => COMMENT_PLACEHOLDER.to_string(),
        };
        Self {
            name: record[0].to_string(),
            unit: record[1].to_string(),
            expression: record[2].to_string(),
            comment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvError {
    /// A record has fewer than name, unit and expression.
    ShortRow { line: u64, fields: usize },
    /// The writer failed, or the reader reported an error.
    ///
    /// The reader accepts an unterminated quote; it ends up as a short row.
    Malformed(String),
}

impl fmt::Display for CsvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortRow { line, fields } => write!(
                f,
                "line {line}: expected at least {MIN_FIELDS} fields (name, unit, expression), found {fields}"
            ),
            Self::Malformed(msg) => write!(f, "malformed CSV: {msg}"),
        }
    }
}

impl std::error::Error for CsvError {}

/// Render rows as CSV text: four always-quoted fields, `"` doubled, `\n` terminated.
pub fn write_rows(rows: &[ParameterRow]) -> Result<String, CsvError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in rows {
        writer
            .write_record([&row.name, &row.unit, &row.expression, &row.comment])
            .map_err(|e| CsvError::Malformed(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CsvError::Malformed(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CsvError::Malformed(e.to_string()))
}

/// Parse CSV text into rows, in file order.
///
/// Blank lines are skipped. Fields after the fourth are ignored. The first
/// record with fewer than three fields fails the whole parse.
pub fn parse_rows(content: &str) -> Result<Vec<ParameterRow>, CsvError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    // The reader skips empty lines for both LF and CRLF endings
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| CsvError::Malformed(e.to_string()))?;
        if record.len() < MIN_FIELDS {
            let line = record
                .position()
                .map(|p| line_at(content, p.byte() as usize))
                .unwrap_or(0);
            return Err(CsvError::ShortRow { line, fields: record.len() });
        }
        rows.push(ParameterRow::from_record(&record));
    }

    Ok(rows)
}

/// 1-based file line of the record starting at `byte`.
///
/// The reader's own line counter misses skipped blank lines and CRLF breaks,
/// and a record's offset points at the blank lines before it.
fn line_at(content: &str, byte: usize) -> u64 {
    let bytes = content.as_bytes();
    let mut start = byte.min(bytes.len());
    while start < bytes.len() && matches!(bytes[start], b'\r' | b'\n') {
        start += 1;
    }
    bytes[..start].iter().filter(|&&b| b == b'\n').count() as u64 + 1
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            log::warn!("{} is not valid UTF-8, decoding as Windows-1252", path.display());
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}
