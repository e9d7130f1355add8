//! qreg - Quantum register simulator
//! Command-line interface for running the bundled quantum algorithms

mod algorithms;

use algorithms::deutsch_jozsa::{self, OracleKind};
use algorithms::{grover, sample, simon};
use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use qreg_core::SimConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "qreg")]
#[command(author = "QReg Contributors")]
#[command(version = "2026.1.16")]
#[command(about = "qreg - dense state-vector quantum simulator", long_about = None)]
struct Cli {
    /// Seed for measurement sampling (overrides QREG_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide whether a 2-input oracle is constant or balanced
    DeutschJozsa {
        /// Oracle to query
        #[arg(long, value_enum, default_value_t = OracleKind::Balanced)]
        oracle: OracleKind,
    },

    /// Search for a marked item with Grover's algorithm
    Grover {
        /// Number of input qubits
        #[arg(short, long, default_value_t = 3)]
        bits: usize,

        /// Index of the marked item
        #[arg(short, long, default_value_t = 5)]
        marked: usize,
    },

    /// Recover the XOR period of a 2-to-1 function
    Simon {
        /// Number of input qubits
        #[arg(short, long, default_value_t = 3)]
        bits: usize,

        /// Hidden period
        #[arg(short, long, default_value_t = 5)]
        secret: usize,
    },

    /// Sample the uniform superposition and print a histogram
    Sample {
        /// Register width
        #[arg(short, long, default_value_t = 3)]
        width: usize,

        /// Number of measurements
        #[arg(short = 'n', long, default_value_t = 1000)]
        shots: usize,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qreg=info,qreg_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = SimConfig::from_env();
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    tracing::info!(
        parallel_threshold = config.parallel_threshold,
        seed = ?config.seed,
        "simulator configured"
    );

    if let Err(e) = run(cli.command, &config) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &SimConfig) -> Result<()> {
    let mut rng = config.rng();

    match command {
        Commands::DeutschJozsa { oracle } => {
            let verdict = deutsch_jozsa::run(oracle, config, &mut rng)?;
            let label = if verdict.constant {
                "constant".green().bold()
            } else {
                "balanced".yellow().bold()
            };
            println!("{} inputs measured as {:02b}", "Result:".bold(), verdict.inputs);
            println!("{}", label);
        }

        Commands::Grover { bits, marked } => {
            let outcome = grover::search(bits, marked, config, &mut rng)?;
            println!(
                "{} {} iteration(s), P(marked) = {:.6}",
                "Grover:".bold(),
                outcome.iterations,
                outcome.success_probability
            );
            let found = outcome.found.to_string();
            if outcome.found == marked {
                println!("Found {}", found.green().bold());
            } else {
                println!("Found {} (expected {})", found.red().bold(), marked);
            }
        }

        Commands::Simon { bits, secret } => {
            let outcome = simon::solve(bits, secret, config, &mut rng)?;
            println!(
                "{} {} sample(s), {} independent equation(s)",
                "Simon:".bold(),
                outcome.samples,
                outcome.equations.len()
            );
            for equation in &outcome.equations {
                println!("  y = {:0width$b}", equation, width = bits);
            }
            println!("Secret is {}", outcome.secret.to_string().green().bold());
        }

        Commands::Sample { width, shots } => {
            let histogram = sample::uniform(width, shots, config, &mut rng)?;
            print_histogram(&histogram);
        }
    }

    Ok(())
}

/// Barra máxima do histograma
const BAR_WIDTH: usize = 40;

fn print_histogram(histogram: &sample::Histogram) {
    println!(
        "{} {} shot(s) over {} state(s)",
        "Sample:".bold(),
        histogram.shots(),
        histogram.counts.len()
    );
    let max = histogram.counts.iter().copied().max().unwrap_or(0).max(1);
    let digits = histogram.width.max(1);
    for (state, &count) in histogram.counts.iter().enumerate() {
        let bar = "█".repeat(count * BAR_WIDTH / max);
        println!(
            "  |{:0digits$b}> {:>8} {:.4} {}",
            state,
            count,
            histogram.frequency(state),
            bar.cyan()
        );
    }
}
