//! Reaction tic-tac-toe bot entrypoint.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use reaction_ttt::{
    ChallengeCommand, ChannelChat, Participant, ReactionEvent, SessionConfig, symbols,
};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run { token } => run_service(token).await,
        Command::Demo => run_demo().await,
    }
}

/// Run the long-running bot service.
async fn run_service(token: Option<String>) -> Result<()> {
    let token = token
        .or_else(|| std::env::var("TTT_BOT_TOKEN").ok())
        .context("no platform token: pass --token or set TTT_BOT_TOKEN")?;

    info!(token_len = token.len(), "starting reaction tic-tac-toe bot");

    // The platform adapter is wired at deployment: implement ChatClient
    // for your SDK's connection and hand reaction events to the session
    // loop. Nothing platform-specific ships in this crate.
    info!("no platform adapter compiled in; see ChatClient in the library docs");
    Ok(())
}

/// Play a scripted game end to end through the in-process chat client.
async fn run_demo() -> Result<()> {
    let ana = Participant::new(1, "ana");
    let ben = Participant::new(2, "ben");

    let (mut chat, events) = ChannelChat::new();

    // Script: ana takes the top row; ben answers in the middle row.
    // A stray reaction from an outsider and a duplicate square are
    // thrown in to show the loop shedding them.
    use reaction_ttt::Position::*;
    for (id, pos) in [
        (1, TopLeft),
        (3, Center),  // not in this game
        (2, MiddleLeft),
        (2, MiddleLeft), // duplicate, already consumed
        (1, TopCenter),
        (2, Center),
        (1, TopRight),
    ] {
        events.send(ReactionEvent {
            participant_id: id,
            symbol: symbols::symbol_for(pos).to_string(),
        })?;
    }

    let outcome = ChallengeCommand::new(ana, Some(ben))?
        .with_config(SessionConfig {
            move_timeout: Duration::from_secs(5),
        })
        .execute(&mut chat, 0)
        .await?;

    info!(?outcome, "demo game finished");
    if let Some(embed) = chat.last_message() {
        println!("{}", serde_json::to_string_pretty(embed)?);
    }
    Ok(())
}
