//! Nasch Run - drives the traffic automaton and draws it in the terminal
//!
//! Loads a JSON configuration, places the cars, and advances the lane
//! once per `delta_t`, redrawing the history window as a heatmap after
//! every tick. Logs go to stderr so they do not interleave with frames.

mod heatmap;
mod load;

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use nasch_core::Clock;
use nasch_engine::{run_loop, Limit, LockstepSim, SleepClock, StopReason, Unpaced};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::heatmap::Heatmap;

#[derive(Parser, Debug)]
#[command(name = "nasch-run")]
#[command(about = "Run a Nagel-Schreckenberg traffic lane with a terminal heatmap")]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(default_value = "nasch.json")]
    config: PathBuf,

    /// Number of ticks to run (0 = run until interrupted)
    #[arg(long, default_value = "0")]
    ticks: u64,

    /// Seed for placement and delay draws (overrides the file)
    #[arg(long)]
    seed: Option<u64>,

    /// Advance as fast as possible instead of once per delta_t
    #[arg(long)]
    no_pacing: bool,

    /// Heatmap width in columns (defaults to $COLUMNS, then 80)
    #[arg(long)]
    width: Option<usize>,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nasch_run=info,nasch_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    info!("Loading configuration from: {}", cli.config.display());
    let raw = match load::load_file(&cli.config) {
        Ok(raw) => raw,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let config = match nasch_engine::resolve(&raw) {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let config = match cli.seed {
        Some(seed) => config.with_seed(seed),
        None if !raw.contains_key("seed") => config.with_seed(clock_seed()),
        None => config,
    };
    info!(
        cells = config.num_cells(),
        cars = config.num_cars(),
        seed = config.seed(),
        "Configuration resolved"
    );

    let mut sim = match LockstepSim::new(config) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to set up simulation: {}", e);
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    if !stdout.is_terminal() {
        warn!("stdout is not a terminal; frames will contain raw escape codes");
    }
    let width = cli.width.unwrap_or_else(terminal_width);
    let renderer = Heatmap::new(stdout.lock(), width);

    let clock: Box<dyn Clock> = if cli.no_pacing {
        Box::new(Unpaced)
    } else {
        Box::new(SleepClock)
    };
    let clock: Box<dyn Clock> = if cli.ticks > 0 {
        Box::new(Limit::new(clock, cli.ticks))
    } else {
        clock
    };

    match run_loop(&mut sim, renderer, clock) {
        Ok(report) => {
            info!(
                ticks = report.ticks(),
                overruns = report.metrics.overruns,
                "Simulation finished"
            );
            if let StopReason::RenderFailed { tick, error } = report.reason {
                error!("Rendering failed at tick {}: {}", tick, error);
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("Simulation error: {}", e);
            std::process::exit(1);
        }
    }
}

fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.trim().parse().ok())
        .filter(|&w: &usize| w > 0)
        .unwrap_or(80)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
