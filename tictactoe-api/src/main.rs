//! Tic-tac-toe Web API
//!
//! Hosts one in-memory game session for a browser view that talks JSON
//! instead of loading the WASM build of tictactoe-core. Nothing is persisted;
//! restarting the server starts a new game.

mod cli;
mod models;
mod routes;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::routes::{app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let address = cli.bind_address();

    let state = AppState::default();
    let router = app(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    info!(%address, "Tic-tac-toe API running on http://{}", address);

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
