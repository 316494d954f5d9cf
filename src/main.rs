//! Binary entry point for staffmail.
//!
//! Manages departments, employees, and the email subscription list stored in
//! a local `SQLite` file.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use commands::{
    DepartmentAction, EmployeeAction, OutputFormat, SubscriptionAction, cmd_department,
    cmd_employee, cmd_export, cmd_import, cmd_stats, cmd_subscription,
};
use staffmail::config::StaffmailConfig;
use staffmail::io::Format;
use staffmail::models::SubscriptionStatus;
use staffmail::{SqliteStore, observability};

/// Staffmail - departments, employees, and the company email list.
#[derive(Parser)]
#[command(name = "staffmail")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "STAFFMAIL_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Path to the `SQLite` data file (overrides config and environment).
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Manage departments.
    Department {
        #[command(subcommand)]
        action: DepartmentAction,
    },

    /// Manage employees.
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Manage email subscriptions.
    Subscription {
        #[command(subcommand)]
        action: SubscriptionAction,
    },

    /// Export subscriptions to a CSV or XLSX file.
    Export {
        /// Output file; the format follows its extension unless `--format` is given.
        output: PathBuf,

        /// Output format: csv or xlsx.
        #[arg(short, long)]
        format: Option<Format>,

        /// Only export subscriptions with this status.
        #[arg(short, long)]
        status: Option<SubscriptionStatus>,
    },

    /// Import subscriptions from a CSV file.
    Import {
        /// CSV file to read.
        file: PathBuf,

        /// Insert rows even when their email already exists.
        #[arg(long)]
        allow_duplicates: bool,
    },

    /// Show counts and staffing gaps.
    Stats {
        /// Output format.
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    // A missing .env file is not an error.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match StaffmailConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };
    let config = match cli.database.clone() {
        Some(path) => config.with_database_path(path),
        None => config,
    };

    if let Err(e) = observability::init_from_config(&config.logging, cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Opens the store and runs the selected command.
fn run_command(cli: Cli, config: &StaffmailConfig) -> staffmail::Result<()> {
    if let Some(source) = &config.source {
        tracing::debug!(path = %source.display(), "Loaded configuration");
    }
    let store = Arc::new(SqliteStore::open(config.database_path.clone())?);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Department { action } => cmd_department(&*store, action, &mut out)?,

        Commands::Employee { action } => cmd_employee(&*store, action, &mut out)?,

        Commands::Subscription { action } => {
            cmd_subscription(&*store, action, &mut out)?;
        },

        Commands::Export {
            output,
            format,
            status,
        } => cmd_export(store.clone(), &output, format, status, &mut out)?,

        Commands::Import {
            file,
            allow_duplicates,
        } => cmd_import(store.clone(), &file, allow_duplicates, config.import, &mut out)?,

        Commands::Stats { format } => cmd_stats(store.clone(), format, &mut out)?,
    }

    out.flush().map_err(|e| staffmail::Error::OperationFailed {
        operation: "write_output".to_string(),
        cause: e.to_string(),
    })?;
    drop(out);

    match Arc::try_unwrap(store) {
        Ok(store) => store.close(),
        Err(_) => Ok(()),
    }
}
