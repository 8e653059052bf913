//! Tic-tac-toe game-tree census
//!
//! Enumerates every game from the empty board through tictactoe-core and
//! reports how they end.
//!
//! Usage:
//!   cargo run --release --bin census
//!   cargo run --release --bin census -- --json
//!   cargo run --release --bin census -- --verify

mod census;
mod report;

use std::time::Instant;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::census::KNOWN_TOTALS;

/// Count every possible tic-tac-toe game
#[derive(Parser, Debug)]
#[command(name = "census")]
#[command(version)]
struct Cli {
    /// Print the counts as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Exit with an error unless the counts match the known totals
    #[arg(long)]
    verify: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("Enumerating every game from the empty board");
    let start = Instant::now();
    let census = census::run()?;
    let elapsed = start.elapsed();
    info!(
        nodes = census.nodes,
        games = census.games,
        elapsed_ms = elapsed.as_millis() as u64,
        "Enumeration complete"
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&census)?);
    } else {
        report::print_summary(&census, elapsed);
    }

    if cli.verify {
        let diffs = census.differences(&KNOWN_TOTALS);
        if !diffs.is_empty() {
            for diff in &diffs {
                error!("{}", diff);
            }
            bail!("census differs from the known totals in {} field(s)", diffs.len());
        }
        info!("Counts match the known totals");
    }

    Ok(())
}
