// paramsync CLI - import/export design parameters as CSV

mod design;
mod exit_codes;
mod export;
mod import;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use paramsync_config::settings::Settings;
use paramsync_sync::SyncError;

use exit_codes::{EXIT_DESIGN, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE, sync_exit_code};

/// Environment variable holding a log filter; overrides the `log.level` setting.
const LOG_ENV: &str = "PSYNC_LOG";

#[derive(Parser)]
#[command(name = "psync")]
#[command(about = "Import and export design parameters as CSV")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write every parameter of a design to a CSV file
    #[command(after_help = "\
Each line holds four quoted fields: \"name\",\"unit\",\"expression\",\"comment\".
An existing CSV file is overwritten.

Examples:
  psync export bracket.design params.csv
  psync export bracket.json params.csv -q")]
    Export {
        /// Design document (.design or .json)
        design: PathBuf,

        /// CSV file to write
        csv: PathBuf,

        /// Suppress the confirmation message
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Update existing parameters and add new ones from a CSV file
    #[command(after_help = "\
Rows are matched to parameters by exact name: a match is updated in place,
anything else is created. Rows need at least name, unit and expression; the
comment is optional. A row with fewer than 3 fields rejects the whole file.

Examples:
  psync import bracket.design params.csv
  psync import bracket.design params.csv --dry-run")]
    Import {
        /// Design document (.design or .json)
        design: PathBuf,

        /// CSV file to read
        csv: PathBuf,

        /// Show what would change without saving the design
        #[arg(long)]
        dry_run: bool,

        /// Suppress the confirmation message
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Re-import the CSV file of the last import, without confirmation
    #[command(after_help = "\
Examples:
  psync import bracket.design params.csv
  psync quick-import bracket.design")]
    QuickImport {
        /// Design document (.design or .json)
        design: PathBuf,
    },

    /// Show the creates and updates an import would perform
    #[command(after_help = "\
Examples:
  psync plan bracket.design params.csv
  psync plan bracket.design params.csv --json | jq '.summary'")]
    Plan {
        /// Design document (.design or .json)
        design: PathBuf,

        /// CSV file to read
        csv: PathBuf,

        /// Output JSON instead of a human summary
        #[arg(long)]
        json: bool,
    },

    /// Print the parameters of a design
    List {
        /// Design document (.design or .json)
        design: PathBuf,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an empty design document
    Init {
        /// Design document to create (.design or .json)
        design: PathBuf,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

/// Route `log` records from the library crates to stderr.
fn init_logging(verbose: bool, settings: &Settings) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&settings.log_level))
    };

    // Also installs the log -> tracing bridge
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = Settings::load();
    init_logging(cli.verbose, &settings);

    let result = match cli.command {
        Commands::Export { design, csv, quiet } => {
            export::cmd_export(design, csv, quiet || !settings.export_confirm)
        }
        Commands::Import { design, csv, dry_run, quiet } => {
            import::cmd_import(design, csv, dry_run, quiet || !settings.import_confirm)
        }
        Commands::QuickImport { design } => import::cmd_quick_import(design),
        Commands::Plan { design, csv, json } => import::cmd_plan(design, csv, json),
        Commands::List { design, json } => design::cmd_list(design, json),
        Commands::Init { design, force } => design::cmd_init(design, force),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn design(msg: impl Into<String>) -> Self {
        Self::new(EXIT_DESIGN, msg)
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    /// Create error from a sync error with the matching exit code.
    pub fn sync(err: SyncError) -> Self {
        let code = sync_exit_code(&err);
        let hint = match &err {
            SyncError::Parse { .. } => {
                Some("every row needs \"name\",\"unit\",\"expression\"; no parameters were changed".to_string())
            }
            SyncError::Host { .. } => {
                Some("rows before this one were applied and saved".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
