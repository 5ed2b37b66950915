//! biolot entry point: CLI wiring and config-driven portfolio runs.

mod cli;
mod logging;

use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;

use biolot::audit::AuditLog;
use biolot::config::ScenarioConfig;
use biolot::io::export::{export_csv, export_json};
use biolot::portfolio::run_portfolio;

use crate::cli::{AuditArgs, Cli, Command, RunArgs, SourceArgs};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Run(args) => run_cmd(args),
        Command::Presets => {
            for name in ScenarioConfig::PRESETS {
                println!("{name}");
            }
            Ok(())
        }
        Command::Audit(args) => audit_cmd(args),
        #[cfg(feature = "api")]
        Command::Serve(args) => serve_cmd(args),
    }
}

/// Loads the scenario: `--scenario` if given, else `--preset`, else `demo`.
fn load_scenario(source: &SourceArgs) -> Result<ScenarioConfig> {
    let cfg = if let Some(path) = &source.scenario {
        ScenarioConfig::from_toml_file(path)?
    } else {
        ScenarioConfig::from_preset(source.preset.as_deref().unwrap_or("demo"))?
    };
    Ok(cfg)
}

/// Prints every validation error and fails if there are any.
fn ensure_valid(cfg: &ScenarioConfig) -> Result<()> {
    let errors = cfg.validate();
    if errors.is_empty() {
        return Ok(());
    }
    for e in &errors {
        eprintln!("{e}");
    }
    bail!("{} configuration error(s)", errors.len())
}

fn run_cmd(args: RunArgs) -> Result<()> {
    let mut scenario = load_scenario(&args.source)?;
    if let Some(id) = &args.facility {
        scenario = scenario.select_facility(id)?;
    }
    ensure_valid(&scenario)?;

    let result = run_portfolio(&scenario.facilities());
    println!("{result}");

    if let Some(path) = &args.json_out {
        export_json(&result, path)
            .with_context(|| format!("failed to write JSON to {}", path.display()))?;
        eprintln!("JSON written to {}", path.display());
    }

    if let Some(path) = &args.csv_out {
        export_csv(&result, path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        eprintln!("CSV written to {}", path.display());
    }

    if let Some(path) = &args.audit_log {
        let log = AuditLog::new(path);
        for entry in &result.entries {
            let record = log.append(&entry.id, &entry.result)?;
            info!(run_id = %record.run_id, facility = %entry.id, "run audited");
        }
        eprintln!(
            "{} audit record(s) appended to {}",
            result.entries.len(),
            path.display()
        );
    }

    Ok(())
}

fn audit_cmd(args: AuditArgs) -> Result<()> {
    let log = AuditLog::new(&args.log);
    let records = log.read_all()?;
    let mut shown = 0usize;
    for r in records
        .iter()
        .filter(|r| args.facility.as_deref().is_none_or(|id| r.facility_id == id))
    {
        println!(
            "{}  {}  {:<12} {:>12.2} t  risk {:>14.2}  saved {:>12.2}  ({})",
            r.timestamp,
            r.run_id,
            r.facility_id,
            r.summary.total_tons,
            r.summary.risk,
            r.summary.total_saved_cost,
            r.engine_version
        );
        shown += 1;
    }
    eprintln!("{shown} record(s)");
    Ok(())
}

#[cfg(feature = "api")]
fn serve_cmd(args: cli::ServeArgs) -> Result<()> {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use biolot::api::{AppState, serve};

    let scenario = load_scenario(&args.source)?;
    ensure_valid(&scenario)?;

    let state = Arc::new(AppState {
        factors: scenario.factors,
        audit: args.audit_log.map(AuditLog::new),
    });
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
    rt.block_on(serve(state, addr))
        .with_context(|| format!("API server on {addr} failed"))
}
