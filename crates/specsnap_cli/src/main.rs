//! specsnap CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments or missing source tree
//! - 3: Readme descriptor could not be parsed
//! - 4: Copy failure (missing declared file or filesystem error)

use std::process::ExitCode;

use clap::Parser;
use specsnap_readme::ReadmeError;
use specsnap_sync::SyncError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const DESCRIPTOR_ERROR: u8 = 3;
    pub const COPY_ERROR: u8 = 4;
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = match cli.command.unwrap_or_default() {
        Commands::Sync(args) => commands::sync::execute(args, cli.config.as_deref()),
        Commands::Fetch(args) => commands::fetch::execute(args, cli.config.as_deref()),
        Commands::Versions(args) => commands::versions::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,specsnap_cli={level},specsnap_sync={level},specsnap_readme={level}"
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    let log_result = if cli.log_json {
        registry.with(fmt::layer().json().with_target(false)).try_init()
    } else {
        registry.with(fmt::layer().with_target(false)).try_init()
    };

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

/// Map an error chain to an exit code.
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if let Some(sync_error) = cause.downcast_ref::<SyncError>() {
            return match sync_error {
                SyncError::SourceNotFound(_) | SyncError::InvalidConfig { .. } => {
                    ExitCodes::INVALID_ARGS
                }
                SyncError::Descriptor { .. } => ExitCodes::DESCRIPTOR_ERROR,
                SyncError::MissingInputFile { .. }
                | SyncError::InvalidInputPath { .. }
                | SyncError::CopyFailed { .. } => ExitCodes::COPY_ERROR,
                _ => ExitCodes::GENERAL_ERROR,
            };
        }
        if cause.downcast_ref::<ReadmeError>().is_some() {
            return ExitCodes::DESCRIPTOR_ERROR;
        }
    }
    ExitCodes::GENERAL_ERROR
}
