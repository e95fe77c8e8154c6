use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use befunge::visualizer::{SharedBuffer, Tee, Visualizer};
use befunge::{Config, Runner, State, UndefinedPolicy};

#[derive(Parser, Debug)]
#[command(name = "befunge")]
#[command(about = "Run Befunge-93 programs")]
struct Args {
    /// Program files, run one after another
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Redraw stack, grid, warnings and output on every step
    #[arg(short, long)]
    debug: bool,

    /// Delay between debug frames, in milliseconds
    #[arg(short, long, default_value = "10")]
    interval: u64,

    /// Seed for `?`; a fresh entropy seed is used otherwise
    #[arg(long)]
    seed: Option<u64>,

    /// Fail on undefined instructions instead of warning
    #[arg(long)]
    strict: bool,

    /// Prompt before reading with `&` and `~`
    #[arg(long)]
    prompt: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();

    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let config = Config {
        undefined: if args.strict {
            UndefinedPolicy::Strict
        } else {
            UndefinedPolicy::Warn
        },
        prompt: args.prompt,
        ..Config::default()
    };

    for path in &args.files {
        if let Err(e) = run_file(path, &args, config.clone(), &mut rng) {
            println!();
            println!("{:#}", e);
            process::exit(1);
        }
        println!();
    }
}

fn run_file(path: &Path, args: &Args, config: Config, rng: &mut StdRng) -> Result<()> {
    let src = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    info!("running {}", path.display());
    let random = |n: usize| rng.gen_range(0..n);

    let stdin = io::stdin();
    let diagnostics = if args.debug {
        let captured = SharedBuffer::new();
        let input = Tee::new(stdin.lock(), captured.clone());
        let mut vis = Visualizer::new(
            io::stdout(),
            captured.clone(),
            Duration::from_millis(args.interval),
        );
        let mut runner = Runner::new(&src, input, captured, random)
            .with_config(config)
            .with_observer(move |state: &State| {
                if let Err(e) = vis.draw(state) {
                    warn!("debug frame not drawn: {}", e);
                }
            });
        runner
            .run()
            .with_context(|| format!("running {}", path.display()))?;
        runner.state().diagnostics().len()
    } else {
        let mut runner = Runner::new(&src, stdin.lock(), io::stdout().lock(), random)
            .with_config(config);
        runner
            .run()
            .with_context(|| format!("running {}", path.display()))?;
        runner.state().diagnostics().len()
    };
    info!(diagnostics, "finished {}", path.display());
    Ok(())
}
