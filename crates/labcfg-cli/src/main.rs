//! # labcfg CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber and
//! dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use labcfg_cli::settings::Settings;
use labcfg_cli::validate::{run_check, run_types, run_validate, CheckArgs, TypesArgs, ValidateArgs};

/// Exit status for operational failures (as opposed to invalid documents).
const EXIT_FATAL: u8 = 2;

/// Homelab configuration validator.
///
/// Checks network, email, domains and sso documents against a shared JSON
/// schema and a set of security rules.
#[derive(Parser, Debug)]
#[command(name = "labcfg", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate every configuration document in the tree.
    Validate(ValidateArgs),

    /// Validate a single document as the given type.
    Check(CheckArgs),

    /// List configuration types and whether the schema defines them.
    Types(TypesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("labcfg v{} starting", env!("CARGO_PKG_VERSION"));

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(EXIT_FATAL);
        }
    };

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, settings),
        Commands::Check(args) => run_check(&args, settings),
        Commands::Types(args) => run_types(&args, settings),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}
