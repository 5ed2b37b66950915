use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Biodiversity-driven carbon and operational-gain calculator.
#[derive(Parser)]
#[command(
    name = "biolot",
    version,
    about = "Carbon exposure and nature-based operational savings per facility"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Evaluate a portfolio and print the report.
    Run(RunArgs),
    /// List the built-in presets.
    Presets,
    /// Print the records of an audit log.
    Audit(AuditArgs),
    /// Serve the calculator over HTTP.
    #[cfg(feature = "api")]
    Serve(ServeArgs),
}

/// Where the portfolio comes from. Defaults to the `demo` preset.
#[derive(clap::Args)]
pub struct SourceArgs {
    /// Path to a TOML scenario file.
    #[arg(short, long, conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Built-in preset name.
    #[arg(short, long)]
    pub preset: Option<String>,
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only evaluate the facility with this id.
    #[arg(short, long)]
    pub facility: Option<String>,

    /// Write the full result as pretty-printed JSON.
    #[arg(long)]
    pub json_out: Option<PathBuf>,

    /// Write one CSV row per facility plus a total row.
    #[arg(long)]
    pub csv_out: Option<PathBuf>,

    /// Append one audit record per facility to this log.
    #[arg(long)]
    pub audit_log: Option<PathBuf>,
}

/// Arguments for the `audit` subcommand.
#[derive(clap::Args)]
pub struct AuditArgs {
    /// Path to the audit log.
    #[arg(short, long)]
    pub log: PathBuf,

    /// Only show records for this facility id.
    #[arg(short, long)]
    pub facility: Option<String>,
}

/// Arguments for the `serve` subcommand.
#[cfg(feature = "api")]
#[derive(clap::Args)]
pub struct ServeArgs {
    /// Emission factors are taken from this source.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Port to listen on.
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Append an audit record for every `/calculate` request.
    #[arg(long)]
    pub audit_log: Option<PathBuf>,
}
