//! The challenge command: validates an opponent and launches a session.

use crate::chat::{ChannelId, ChatClient, ChatError, Participant};
use crate::session::{GameSession, SessionConfig, SessionController, SessionOutcome};
use tracing::{info, instrument, warn};

/// Why a challenge was refused. The display text is shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum OpponentError {
    /// No opponent was named, or the platform couldn't resolve one.
    #[display("Specify another player.")]
    Missing,

    /// The challenger named themselves.
    #[display("You can't play against yourself.")]
    SelfChallenge,

    /// The named opponent is an automated account.
    #[display("You can't play against a bot.")]
    Bot,
}

impl std::error::Error for OpponentError {}

/// Checks that an opponent is present, distinct from the challenger,
/// and human.
#[instrument(skip_all)]
pub fn validate_opponent(
    challenger: &Participant,
    opponent: Option<&Participant>,
) -> Result<(), OpponentError> {
    let opponent = opponent.ok_or(OpponentError::Missing)?;
    if opponent.id == challenger.id {
        warn!(challenger = challenger.id, "self-challenge refused");
        return Err(OpponentError::SelfChallenge);
    }
    if opponent.is_bot {
        warn!(opponent = opponent.id, "bot opponent refused");
        return Err(OpponentError::Bot);
    }
    Ok(())
}

/// A validated challenge, ready to run.
#[derive(Debug)]
pub struct ChallengeCommand {
    challenger: Participant,
    opponent: Participant,
    config: SessionConfig,
}

impl ChallengeCommand {
    /// Validates the opponent and builds the command.
    ///
    /// # Errors
    ///
    /// Returns [`OpponentError`] when the opponent is missing, is the
    /// challenger, or is an automated account. The session never starts.
    pub fn new(
        challenger: Participant,
        opponent: Option<Participant>,
    ) -> Result<Self, OpponentError> {
        validate_opponent(&challenger, opponent.as_ref())?;
        let opponent = opponent.ok_or(OpponentError::Missing)?;
        Ok(Self {
            challenger,
            opponent,
            config: SessionConfig::default(),
        })
    }

    /// Overrides the session policy.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the game to completion in the given channel. The challenger
    /// plays first. A timed-out session concludes without announcement.
    #[instrument(skip(self, chat), fields(challenger = self.challenger.id, opponent = self.opponent.id))]
    pub async fn execute<C: ChatClient>(
        self,
        chat: &mut C,
        channel: ChannelId,
    ) -> Result<SessionOutcome, ChatError> {
        let session = GameSession::new(self.challenger, self.opponent);
        let outcome = SessionController::with_config(session, self.config)
            .run(chat, channel)
            .await?;
        info!(?outcome, "challenge finished");
        Ok(outcome)
    }
}
