use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use random_bst::config::DEFAULT_NODE_COUNT;
use random_bst::{driver, RunConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Build an unbalanced binary search tree from random keys, print it and search it",
    long_about = None
)]
struct Cli {
    /// Number of random insertions; keys are drawn from [0, COUNT).
    #[arg(short = 'n', long, env = "RANDOM_BST_COUNT", default_value_t = DEFAULT_NODE_COUNT)]
    count: usize,

    /// Seed for a reproducible run.
    #[arg(short, long, env = "RANDOM_BST_SEED")]
    seed: Option<u64>,

    /// Also print the depth-first value dump.
    #[arg(long)]
    df: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbosity {
            0 => "warn",
            1 => "random_bst=info,warn",
            2 => "random_bst=debug,info",
            _ => "random_bst=trace,info",
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = RunConfig::new(cli.count, cli.seed)?.with_df_values(cli.df);
    let mut rng = config.rng();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    driver::run(&config, &mut rng, &mut out)?;
    out.flush()?;

    Ok(())
}
