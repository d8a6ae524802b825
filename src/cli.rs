//! Command-line interface for the bot process.

use clap::{Parser, Subcommand};

/// Reaction-driven tic-tac-toe bot
#[derive(Parser, Debug)]
#[command(name = "reaction_ttt")]
#[command(about = "Play tic-tac-toe in chat with reaction controls", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the bot service (long-running)
    Run {
        /// Platform token. Falls back to the TTT_BOT_TOKEN environment variable.
        #[arg(long)]
        token: Option<String>,
    },

    /// Play a scripted game through the in-process chat client
    Demo,
}
