//! Command line front end: run an evaluation batch and print the results.

use std::path::PathBuf;
use std::time::SystemTime;

use anyhow::{bail, Context};
use clap::error::ErrorKind;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use maexchen::evaluation::{append_run_log, parent_dir_exists};
use maexchen::{Evaluation, EvaluationConfig, Roster, StrategyRegistry};

const DEFAULT_LOG_PATH: &str = "simulation.log";

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulate Mäxchen games between strategies", long_about = None)]
struct Cli {
    /// Number of games to simulate
    num_reps: u32,

    /// Add N Dummy players
    #[arg(long, value_name = "N", num_args = 0..=1, default_missing_value = "1")]
    dummy: Option<u32>,

    /// Add N AdvancedDummy players
    #[arg(long = "adv-dummy", value_name = "N", num_args = 0..=1, default_missing_value = "1")]
    adv_dummy: Option<u32>,

    /// Add N CounterDummy players
    #[arg(long = "c-dummy", value_name = "N", num_args = 0..=1, default_missing_value = "1")]
    c_dummy: Option<u32>,

    /// Add N ShowOff players
    #[arg(long = "show-off", value_name = "N", num_args = 0..=1, default_missing_value = "1")]
    show_off: Option<u32>,

    /// Add N Random players
    #[arg(long, value_name = "N", num_args = 0..=1, default_missing_value = "1")]
    random: Option<u32>,

    /// Add N Threshold players
    #[arg(long, alias = "threshold", value_name = "N", num_args = 0..=1, default_missing_value = "1")]
    thres: Option<u32>,

    /// Add N CounterThreshold players
    #[arg(long = "c-thres", value_name = "N", num_args = 0..=1, default_missing_value = "1")]
    c_thres: Option<u32>,

    /// Add N Tracking players
    #[arg(long, value_name = "N", num_args = 0..=1, default_missing_value = "1")]
    tracking: Option<u32>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output, i.e. no progress bar
    #[arg(short, long)]
    quiet: bool,

    /// Don't write to the log file
    #[arg(short = 'x', long = "no-write")]
    no_write: bool,

    /// File to which simulation results are appended
    #[arg(short = 'o', long = "out", value_name = "PATH")]
    out: Option<PathBuf>,

    /// Don't sort results by win rate
    #[arg(short = 'u', long = "no-sort")]
    no_sort: bool,

    /// Batch seed, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    /// Requested player counts by registry name, in flag order.
    fn requested(&self) -> [(&'static str, Option<u32>); 8] {
        [
            ("dummy", self.dummy),
            ("adv-dummy", self.adv_dummy),
            ("c-dummy", self.c_dummy),
            ("show-off", self.show_off),
            ("random", self.random),
            ("thres", self.thres),
            ("c-thres", self.c_thres),
            ("tracking", self.tracking),
        ]
    }
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .context("initialize logger")
}

fn build_roster(cli: &Cli) -> anyhow::Result<Roster> {
    let registry = StrategyRegistry::with_builtins();
    let mut roster = Roster::new();
    for (name, count) in cli.requested() {
        for _ in 0..count.unwrap_or(0) {
            let strategy = registry
                .create(name)
                .with_context(|| format!("unknown strategy {}", name))?;
            roster.push(strategy);
        }
    }
    Ok(roster)
}

fn progress(total: u32, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(u64::from(total));
    if let Ok(style) = ProgressStyle::with_template("[{bar:40}] {pos}/{len} games ({eta})") {
        bar.set_style(style.progress_chars("#>."));
    }
    bar
}

fn run(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose)?;

    let roster = build_roster(&cli)?;
    if roster.is_empty() {
        bail!("You must specify at least one player (see --help)");
    }

    let log_path = if cli.no_write {
        None
    } else {
        let path = cli.out.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH));
        if !parent_dir_exists(&path) {
            bail!("Can't write to {}: Directory doesn't exist.", path.display());
        }
        Some(path)
    };

    let names: Vec<String> = roster
        .seats()
        .iter()
        .map(|seat| seat.strategy.name().to_string())
        .collect();

    let mut config = EvaluationConfig::new().with_repetitions(cli.num_reps);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let started_at = SystemTime::now();
    let mut evaluation = Evaluation::new(roster, config);
    let bar = progress(cli.num_reps, cli.quiet);
    let results = evaluation.run_with_progress(|done, _| bar.set_position(u64::from(done)));
    bar.finish();
    let results = results?;

    let summary = results.summary(!cli.no_sort);
    if let Some(path) = log_path {
        append_run_log(&path, started_at, &names, cli.num_reps, &summary)
            .with_context(|| format!("write run log to {}", path.display()))?;
    }
    print!("{}", summary);
    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
