//! Command-line interface for the tic-tac-toe API.

use clap::Parser;

/// Local web API hosting a single tic-tac-toe session
#[derive(Parser, Debug)]
#[command(name = "tictactoe-api")]
#[command(about = "Serves one tic-tac-toe game with history and time travel", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Host to bind to
    #[arg(long, env = "TICTACTOE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind to
    #[arg(short, long, env = "TICTACTOE_PORT", default_value = "8000")]
    pub port: u16,
}

impl Cli {
    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
