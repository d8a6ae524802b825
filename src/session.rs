//! Session controller: binds one game to two participants and drives
//! the turn loop against the chat platform.

use crate::chat::{
    ChannelId, ChatClient, ChatError, GameEmbed, MessageHandle, Participant, ParticipantId,
};
use crate::game::{Game, GameStatus, Mark};
use crate::symbols;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, instrument, warn};

/// Policy knobs for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long to wait for a valid move before ending the session.
    pub move_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            // One move per day is generous even for play-by-chat.
            move_timeout: Duration::from_secs(60 * 60 * 24),
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A mark completed a line.
    Won(Mark),
    /// Board filled with no line.
    Draw,
    /// No valid move arrived in time; ended silently.
    TimedOut,
    /// The game message went away mid-game.
    Aborted,
}

/// One game between two participants.
///
/// Mark A belongs to the challenger and moves first. The consumed-symbol
/// set mirrors board occupancy; it exists to shed duplicate or racing
/// reaction events for the same square before they reach the engine.
#[derive(Debug)]
pub struct GameSession {
    player_a: Participant,
    player_b: Participant,
    game: Game,
    consumed: HashSet<&'static str>,
}

impl GameSession {
    /// Creates a session. `player_a` is the challenger.
    #[instrument(skip_all, fields(a = %player_a.name, b = %player_b.name))]
    pub fn new(player_a: Participant, player_b: Participant) -> Self {
        info!("creating game session");
        Self {
            player_a,
            player_b,
            game: Game::new(),
            consumed: HashSet::new(),
        }
    }

    /// Returns the game state.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the participant playing the given mark.
    pub fn participant_for(&self, mark: Mark) -> &Participant {
        match mark {
            Mark::A => &self.player_a,
            Mark::B => &self.player_b,
        }
    }

    /// Returns the participant whose turn it is.
    pub fn active_participant(&self) -> &Participant {
        self.participant_for(self.game.to_move())
    }

    /// Checks whether the given participant moves next.
    pub fn is_active(&self, id: ParticipantId) -> bool {
        self.active_participant().id == id
    }

    /// Builds the message content for the current state.
    pub fn embed(&self) -> GameEmbed {
        let caption = match self.game.status() {
            GameStatus::InProgress => format!("{}'s turn!", self.active_participant().name),
            GameStatus::Won(mark) => format!("{} has won!", self.participant_for(mark).name),
            GameStatus::Draw => "It's a draw!".to_string(),
        };
        GameEmbed {
            title: "Tic-Tac-Toe!".to_string(),
            description: format!(
                "{} vs. {}\n{}",
                self.player_a.name, self.player_b.name, caption
            ),
            grid: self.game.board().render(),
        }
    }
}

/// Drives one [`GameSession`] to completion over a [`ChatClient`].
///
/// A session is one sequential control flow with a single outstanding
/// wait at a time. Sessions for different channels run as independent
/// tasks and share nothing.
#[derive(Debug)]
pub struct SessionController {
    session: GameSession,
    config: SessionConfig,
}

impl SessionController {
    /// Creates a controller with default policy.
    pub fn new(session: GameSession) -> Self {
        Self::with_config(session, SessionConfig::default())
    }

    /// Creates a controller with the given policy.
    pub fn with_config(session: GameSession, config: SessionConfig) -> Self {
        Self { session, config }
    }

    /// Runs the session: posts the board, registers the nine reaction
    /// controls, then alternates turns until the game ends, the move
    /// deadline passes, or the message goes stale.
    ///
    /// Reaction controls are cleared exactly once on every exit path
    /// that reaches the turn loop. A timeout ends the session silently,
    /// with no outcome edit.
    ///
    /// # Errors
    ///
    /// Propagates [`ChatError`] from initial setup and from the event
    /// source closing. A stale handle mid-game is not an error; it maps
    /// to [`SessionOutcome::Aborted`].
    #[instrument(skip_all, fields(channel))]
    pub async fn run<C: ChatClient>(
        mut self,
        chat: &mut C,
        channel: ChannelId,
    ) -> Result<SessionOutcome, ChatError> {
        let handle = chat.send_message(channel, &self.session.embed()).await?;
        chat.add_reactions(handle, &symbols::all_symbols()).await?;

        let mut deadline = Instant::now() + self.config.move_timeout;
        loop {
            let event = match timeout_at(deadline, chat.next_reaction(handle)).await {
                Err(_) => {
                    info!("no valid move before deadline, ending session");
                    let _ = chat.clear_reactions(handle).await;
                    return Ok(SessionOutcome::TimedOut);
                }
                Ok(None) => {
                    let _ = chat.clear_reactions(handle).await;
                    return Err(ChatError::Closed);
                }
                Ok(Some(event)) => event,
            };

            // Qualify the event before it touches the engine: known
            // symbol, not yet consumed, sent by the active player.
            let Some(position) = symbols::position_for(&event.symbol) else {
                debug!(symbol = %event.symbol, "ignoring unknown symbol");
                continue;
            };
            let symbol = symbols::symbol_for(position);
            if self.session.consumed.contains(symbol) {
                debug!(%symbol, "ignoring consumed symbol");
                continue;
            }
            if !self.session.is_active(event.participant_id) {
                debug!(
                    participant = event.participant_id,
                    "ignoring reaction from non-active participant"
                );
                continue;
            }

            let status = match self.session.game.make_move(position) {
                Ok(status) => status,
                Err(err) => {
                    // The consumed set and board occupancy should agree,
                    // so a rejection here means they diverged.
                    warn!(%err, %position, "engine rejected a qualified event");
                    continue;
                }
            };
            self.session.consumed.insert(symbol);
            deadline = Instant::now() + self.config.move_timeout;
            debug!(%position, ?status, "move accepted");

            match status {
                GameStatus::InProgress => {
                    match chat.edit_message(handle, &self.session.embed()).await {
                        Ok(()) => {}
                        Err(ChatError::StaleHandle(_)) => {
                            warn!("game message went away, aborting session");
                            let _ = chat.clear_reactions(handle).await;
                            return Ok(SessionOutcome::Aborted);
                        }
                        Err(err) => return Err(err),
                    }
                }
                GameStatus::Won(mark) => {
                    return self.finish(chat, handle, SessionOutcome::Won(mark)).await;
                }
                GameStatus::Draw => {
                    return self.finish(chat, handle, SessionOutcome::Draw).await;
                }
            }
        }
    }

    /// Final render plus teardown for a concluded game.
    async fn finish<C: ChatClient>(
        &self,
        chat: &mut C,
        handle: MessageHandle,
        outcome: SessionOutcome,
    ) -> Result<SessionOutcome, ChatError> {
        let edit = chat.edit_message(handle, &self.session.embed()).await;
        let _ = chat.clear_reactions(handle).await;
        match edit {
            Ok(()) => {
                info!(?outcome, "session concluded");
                Ok(outcome)
            }
            Err(ChatError::StaleHandle(_)) => {
                warn!("game message went away during final render");
                Ok(SessionOutcome::Aborted)
            }
            Err(err) => Err(err),
        }
    }
}
