//! ---
//! ranklog_section: "04-binaries"
//! ranklog_subsection: "binary"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Binary entrypoint for the ranklog demonstration."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ranklog::{rank_info, ColorChoice, Manager, Runtime, Severity, TerminalSink};
use ranklog_common::config::{DiagnosticsConfig, ManagerConfig};
use ranklog_common::logging::{init_tracing, DiagnosticsFormat};
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(author, version, about = "Rank-ordered logging demo", long_about = None)]
struct Cli {
    #[arg(long, value_name = "FILE", help = "Path to a ranklog TOML configuration file")]
    config: Option<PathBuf>,

    #[arg(long, help = "Maximum severity to emit (overrides RANKLOG_LEVEL)")]
    level: Option<String>,

    #[arg(long, help = "Emitting ranks: leader or all (overrides RANKLOG_RANKS)")]
    ranks: Option<String>,

    #[arg(
        long,
        default_value_t = 4,
        help = "Number of in-process ranks (ignored when built with MPI)"
    )]
    procs: usize,

    #[arg(long, value_enum, default_value_t = CliColor::Auto, help = "Colorize rank output")]
    color: CliColor,

    #[arg(
        long,
        value_enum,
        default_value_t = CliDiagnostics::Pretty,
        help = "Diagnostics format on stderr"
    )]
    diagnostics: CliDiagnostics,

    #[arg(long, help = "Leave one timer open to show the shutdown drain")]
    leak_timer: bool,

    #[arg(long, value_name = "RANK", help = "Abort the group from this rank")]
    abort_on: Option<usize>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliColor {
    Auto,
    Always,
    Never,
}

impl From<CliColor> for ColorChoice {
    fn from(value: CliColor) -> Self {
        match value {
            CliColor::Auto => ColorChoice::Auto,
            CliColor::Always => ColorChoice::Always,
            CliColor::Never => ColorChoice::Never,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliDiagnostics {
    Pretty,
    Json,
}

impl From<CliDiagnostics> for DiagnosticsFormat {
    fn from(value: CliDiagnostics) -> Self {
        match value {
            CliDiagnostics::Pretty => DiagnosticsFormat::Pretty,
            CliDiagnostics::Json => DiagnosticsFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(
        "ranklog-demo",
        &DiagnosticsConfig {
            format: cli.diagnostics.into(),
            ..DiagnosticsConfig::default()
        },
    );

    let mut candidates = Vec::new();
    if let Some(path) = &cli.config {
        candidates.push(path.clone());
    }
    candidates.push(PathBuf::from("configs/ranklog.toml"));
    let loaded = ManagerConfig::load_with_source(&candidates)?;
    let config = loaded
        .config
        .apply_env_overrides()
        .context("invalid environment override")?
        .apply_overrides(cli.level.as_deref(), cli.ranks.as_deref())
        .context("invalid command-line override")?;
    info!(level = %config.level, ranks = %config.ranks, source = ?loaded.source, "configuration loaded");

    launch(&cli, config)
}

#[cfg(not(feature = "mpi"))]
fn launch(cli: &Cli, config: ManagerConfig) -> Result<()> {
    use ranklog_runtime::{GroupError, ThreadGroup};

    let outcome = ThreadGroup::run(cli.procs, |runtime| {
        let sink = TerminalSink::new(cli.color.into());
        let mut manager = Manager::with_sink(runtime, config, sink);
        workload(&mut manager, cli);
    });
    match outcome {
        Ok(_) => Ok(()),
        Err(GroupError::Aborted { status, .. }) => std::process::exit(status),
        Err(err) => Err(err.into()),
    }
}

#[cfg(feature = "mpi")]
fn launch(cli: &Cli, config: ManagerConfig) -> Result<()> {
    let sink = TerminalSink::new(cli.color.into());
    let mut manager = match Manager::join_mpi(config, sink) {
        Ok(manager) => manager,
        Err(err) => {
            eprintln!("Rank ?: [EMERG]: {err}");
            std::process::exit(ranklog::ABORT_STATUS);
        }
    };
    workload(&mut manager, cli);
    Ok(())
}

fn workload<R: Runtime>(manager: &mut Manager<R>, cli: &Cli) {
    debug!(rank = manager.rank(), "workload starting");
    let (rank, size) = (manager.rank(), manager.size());
    let communicator = manager.communicator().to_string();
    rank_info!(manager, "joined {communicator} as rank {rank} of {size}");
    for severity in Severity::all() {
        manager.log(severity, &format!("sample line at {severity}"));
    }

    manager.timer_start(Severity::Info, "total");
    manager.timed(Severity::Debug, "setup", |manager| {
        thread::sleep(Duration::from_millis(5 * (manager.rank() as u64 + 1)));
    });
    manager.timed(Severity::Notice, "compute", |manager| {
        thread::sleep(Duration::from_millis(10));
        manager.barrier();
    });

    if cli.abort_on == Some(rank) {
        manager.abort("unrecoverable failure requested from the command line");
    }
    manager.barrier();

    if !cli.leak_timer {
        manager.timer_stop();
    }
    debug!(rank, open = manager.open_timers().len(), "workload finished");
}
