//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract. Scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | CLI usage error (bad args, design already exists)    |
//! | 3    | IO error reading or writing a CSV file               |
//! | 4    | CSV parse error (short row, bad quoting)             |
//! | 5    | Parameter rejected (bad expression, name collision)  |
//! | 6    | Quick import with no previous import                 |
//! | 7    | Design document cannot be loaded or saved            |

use paramsync_sync::SyncError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// CSV file could not be read or written.
pub const EXIT_IO: u8 = 3;

/// CSV row with fewer than 3 fields, or malformed CSV. Nothing was applied.
pub const EXIT_PARSE: u8 = 4;

/// Create/update refused. Mutations before the refused one were applied and saved.
pub const EXIT_REJECTED: u8 = 5;

/// `quick-import` with no remembered CSV file.
pub const EXIT_NO_PREVIOUS_IMPORT: u8 = 6;

/// Design document missing, unreadable, or of an unsupported format version.
pub const EXIT_DESIGN: u8 = 7;

/// Map a SyncError to its exit code.
pub fn sync_exit_code(err: &SyncError) -> u8 {
    match err {
        SyncError::Parse { .. } | SyncError::Csv(_) => EXIT_PARSE,
        SyncError::Host { .. } => EXIT_REJECTED,
        SyncError::Io(_) => EXIT_IO,
    }
}
