//! `crossing`: solve a river-crossing puzzle with randomized-insertion search.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use tracing::Level;

use crossing_harness::bundle_dir::write_bundle_dir;
use crossing_harness::config::RunConfig;
use crossing_harness::pacing::PromptPacer;
use crossing_harness::render::{render_solution, ConsoleObserver, NO_SOLUTION};
use crossing_harness::runner::{run_puzzle, RunOutput};
use crossing_search::contract::{NoopObserver, SearchObserverV1};
use crossing_search::policy::{InsertionPolicyV1, SearchPolicyV1};

#[derive(Parser, Debug)]
#[command(
    name = "crossing",
    version,
    about = "Missionaries and cannibals by randomized-insertion search",
    after_help = "Examples:\n  crossing --seed 42\n  crossing --insertion append --quiet\n  crossing --missionaries 2 --cannibals 2 --interactive\n  crossing --seed 7 --bundle-dir out/run7\n"
)]
struct Cli {
    /// Missionaries starting on the left bank
    #[arg(long, default_value_t = 3)]
    missionaries: i32,

    /// Cannibals starting on the left bank
    #[arg(long, default_value_t = 3)]
    cannibals: i32,

    /// Boat capacity
    #[arg(long, default_value_t = 2)]
    capacity: i32,

    /// RNG seed (derived from the clock when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Where new frontier entries are inserted
    #[arg(long, value_enum, default_value_t = Insertion::UniformRandom)]
    insertion: Insertion,

    /// Stop after this many expansions
    #[arg(long, default_value_t = 100_000)]
    max_expansions: u64,

    /// Wait for enter between expansions
    #[arg(long)]
    interactive: bool,

    /// Write the run bundle to this directory
    #[arg(long)]
    bundle_dir: Option<PathBuf>,

    /// Log level for stderr diagnostics (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print only the outcome, not the transcript
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Insertion {
    UniformRandom,
    Append,
    Prepend,
}

impl From<Insertion> for InsertionPolicyV1 {
    fn from(value: Insertion) -> Self {
        match value {
            Insertion::UniformRandom => Self::UniformRandom,
            Insertion::Append => Self::Append,
            Insertion::Prepend => Self::Prepend,
        }
    }
}

impl Cli {
    fn into_config(self, seed: u64) -> RunConfig {
        RunConfig {
            missionaries: self.missionaries,
            cannibals: self.cannibals,
            capacity: self.capacity,
            policy: SearchPolicyV1 {
                seed,
                insertion: self.insertion.into(),
                max_expansions: self.max_expansions,
            },
            interactive: self.interactive,
            bundle_dir: self.bundle_dir,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(message) = init_tracing(&cli.log_level) {
        eprintln!("crossing: {message}");
        return ExitCode::from(2);
    }

    let seed = cli.seed.unwrap_or_else(clock_seed);
    if cli.seed.is_none() {
        eprintln!("seed: {seed}");
    }
    let quiet = cli.quiet;
    let config = cli.into_config(seed);

    let output = match execute(&config, quiet) {
        Ok(output) => output,
        Err(message) => {
            eprintln!("crossing: {message}");
            return ExitCode::from(2);
        }
    };

    match output.result.solution() {
        Some(path) => print!("{}", render_solution(path)),
        None if quiet => println!("{NO_SOLUTION}"),
        None => {}
    }

    if let Some(dir) = &config.bundle_dir {
        if let Err(e) = write_bundle_dir(&output.bundle, dir) {
            eprintln!("crossing: {e}");
            return ExitCode::from(2);
        }
        eprintln!("bundle: {} ({})", dir.display(), output.bundle.digest);
    }

    ExitCode::SUCCESS
}

/// Run with the observer stack the flags ask for.
fn execute(config: &RunConfig, quiet: bool) -> Result<RunOutput, String> {
    let result = match (quiet, config.interactive) {
        (true, false) => run_puzzle(config, &mut NoopObserver),
        (true, true) => run_puzzle(config, &mut pacer(NoopObserver)),
        (false, false) => run_puzzle(config, &mut ConsoleObserver::new(io::stdout())),
        (false, true) => run_puzzle(config, &mut pacer(ConsoleObserver::new(io::stdout()))),
    };
    result.map_err(|e| e.to_string())
}

fn pacer<O: SearchObserverV1>(inner: O) -> PromptPacer<O, io::StdinLock<'static>, io::Stdout> {
    PromptPacer::new(inner, io::stdin().lock(), io::stdout())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() ^ u64::from(d.subsec_nanos()))
}

fn init_tracing(level: &str) -> Result<(), String> {
    let level = parse_log_level(level)?;
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(())
}

fn parse_log_level(level: &str) -> Result<Level, String> {
    match level.to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        other => Err(format!("unknown log level: {other}")),
    }
}
