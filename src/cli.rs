//! Command-line interface for strictly_duel.

use clap::{Parser, Subcommand};

/// Strictly Duel - two-player tic-tac-toe over TCP
#[derive(Parser, Debug)]
#[command(name = "strictly_duel")]
#[command(about = "Two-player networked tic-tac-toe server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the game server
    Serve {
        /// Path to a TOML config file (defaults are used if it doesn't exist)
        #[arg(short, long, default_value = "strictly_duel.toml")]
        config: std::path::PathBuf,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Connect to a server and relay stdin/stdout
    Client {
        /// Display name sent on connect
        #[arg(short, long, default_value = "Player")]
        name: String,

        /// Server host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Server port
        #[arg(short, long, default_value_t = strictly_duel::DEFAULT_PORT)]
        port: u16,
    },
}
