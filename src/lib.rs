//! Reaction-driven tic-tac-toe for chat platforms.
//!
//! Two participants play on a 3x3 board rendered into a single chat
//! message. Moves come in as message reactions: nine directional
//! symbols, one per square. The bot edits the message after every
//! accepted move and tears the controls down when the game ends.
//!
//! # Architecture
//!
//! - **game**: the engine — board, turn order, win/draw detection
//! - **symbols**: the fixed reaction-emoji to square bijection
//! - **session**: turn loop binding one game to two participants
//! - **chat**: the trait a platform SDK adapter implements
//! - **command**: the challenge command that starts a session
//!
//! # Example
//!
//! ```no_run
//! use reaction_ttt::{ChallengeCommand, ChannelChat, Participant};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let challenger = Participant::new(1, "ana");
//! let opponent = Participant::new(2, "ben");
//!
//! let (mut chat, _events) = ChannelChat::new();
//! let outcome = ChallengeCommand::new(challenger, Some(opponent))?
//!     .execute(&mut chat, 0)
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod chat;
mod command;
mod game;
mod session;
pub mod symbols;

pub use chat::{
    ChannelChat, ChannelId, ChatClient, ChatError, GameEmbed, MessageHandle, Participant,
    ParticipantId, ReactionEvent,
};
pub use command::{ChallengeCommand, OpponentError, validate_opponent};
pub use game::{Board, Game, GameStatus, Mark, MoveError, Position, Square};
pub use session::{GameSession, SessionConfig, SessionController, SessionOutcome};
