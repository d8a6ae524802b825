//! The messaging-platform seam.
//!
//! The session loop only needs a handful of operations from the chat
//! platform: post a message, edit it, manage its reactions, and stream
//! reaction events back in arrival order. [`ChatClient`] captures that
//! contract; a platform SDK adapter implements it for production, and
//! [`ChannelChat`] implements it in-process for tests and the demo.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::debug;

/// Identifier for a chat channel.
pub type ChannelId = u64;

/// Identifier for a participant on the platform.
pub type ParticipantId = u64;

/// Handle to a message the bot has posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageHandle(
    /// Platform message id.
    pub u64,
);

/// A participant resolved by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Platform identity.
    pub id: ParticipantId,
    /// Display name, used in captions.
    pub name: String,
    /// True for automated accounts; those can't be challenged.
    pub is_bot: bool,
}

impl Participant {
    /// Creates a human participant.
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_bot: false,
        }
    }

    /// Creates an automated-account participant.
    pub fn bot(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_bot: true,
        }
    }
}

/// A reaction added to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEvent {
    /// Who reacted.
    pub participant_id: ParticipantId,
    /// The reaction symbol.
    pub symbol: String,
}

/// Rendered rich content for a game message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEmbed {
    /// Embed title.
    pub title: String,
    /// Matchup line plus turn/outcome caption.
    pub description: String,
    /// Emoji grid, one row per line.
    pub grid: String,
}

/// Errors surfaced by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ChatError {
    /// The message behind a handle no longer exists.
    #[display("Message {:?} no longer exists", _0)]
    StaleHandle(MessageHandle),

    /// The event source shut down.
    #[display("Chat event source closed")]
    Closed,

    /// Any other platform failure.
    #[display("Platform error: {}", _0)]
    Platform(String),
}

impl std::error::Error for ChatError {}

/// What the session loop needs from the chat platform.
///
/// Methods take `&mut self`: each session owns its client exclusively,
/// which is what keeps moves serialized without locks.
#[async_trait::async_trait]
pub trait ChatClient: Send {
    /// Posts a message and returns a handle for later edits.
    async fn send_message(
        &mut self,
        channel: ChannelId,
        content: &GameEmbed,
    ) -> Result<MessageHandle, ChatError>;

    /// Replaces the content of a previously posted message.
    async fn edit_message(
        &mut self,
        handle: MessageHandle,
        content: &GameEmbed,
    ) -> Result<(), ChatError>;

    /// Attaches the given reaction symbols to a message as input controls.
    async fn add_reactions(
        &mut self,
        handle: MessageHandle,
        symbols: &[&str],
    ) -> Result<(), ChatError>;

    /// Removes all reaction controls from a message.
    async fn clear_reactions(&mut self, handle: MessageHandle) -> Result<(), ChatError>;

    /// Waits for the next reaction on the given message, in arrival
    /// order. Returns `None` once the event source has closed.
    async fn next_reaction(&mut self, handle: MessageHandle) -> Option<ReactionEvent>;
}

/// In-process [`ChatClient`] backed by a tokio channel.
///
/// Messages live in a map, reactions arrive through an mpsc sender, and
/// call counts are recorded so tests can assert on render/teardown
/// behavior. The demo command drives a full session through it.
#[derive(Debug)]
pub struct ChannelChat {
    events: mpsc::UnboundedReceiver<ReactionEvent>,
    messages: HashMap<MessageHandle, GameEmbed>,
    reactions: HashMap<MessageHandle, Vec<String>>,
    next_handle: u64,
    edits: usize,
    clear_calls: usize,
    registered: Vec<String>,
    /// Edits at or past this count fail with a stale handle.
    stale_after_edits: Option<usize>,
}

impl ChannelChat {
    /// Creates a client and the sender used to script reaction events.
    pub fn new() -> (Self, mpsc::UnboundedSender<ReactionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let chat = Self {
            events: rx,
            messages: HashMap::new(),
            reactions: HashMap::new(),
            next_handle: 0,
            edits: 0,
            clear_calls: 0,
            registered: Vec::new(),
            stale_after_edits: None,
        };
        (chat, tx)
    }

    /// Makes every edit from the `n`-th onward fail with `StaleHandle`,
    /// simulating the tracked message being deleted mid-game.
    pub fn fail_edits_from(&mut self, n: usize) {
        self.stale_after_edits = Some(n);
    }

    /// Number of successful message edits.
    pub fn edits(&self) -> usize {
        self.edits
    }

    /// Number of `clear_reactions` calls.
    pub fn clear_calls(&self) -> usize {
        self.clear_calls
    }

    /// Current content of a message.
    pub fn message(&self, handle: MessageHandle) -> Option<&GameEmbed> {
        self.messages.get(&handle)
    }

    /// Content of the most recently posted message.
    pub fn last_message(&self) -> Option<&GameEmbed> {
        self.messages.get(&MessageHandle(self.next_handle.checked_sub(1)?))
    }

    /// Reaction symbols currently attached to a message.
    pub fn attached_reactions(&self, handle: MessageHandle) -> &[String] {
        self.reactions.get(&handle).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every symbol ever registered as a control, in registration
    /// order. Survives `clear_reactions`.
    pub fn registered_symbols(&self) -> &[String] {
        &self.registered
    }
}

#[async_trait::async_trait]
impl ChatClient for ChannelChat {
    async fn send_message(
        &mut self,
        channel: ChannelId,
        content: &GameEmbed,
    ) -> Result<MessageHandle, ChatError> {
        let handle = MessageHandle(self.next_handle);
        self.next_handle += 1;
        self.messages.insert(handle, content.clone());
        debug!(channel, ?handle, "posted message");
        Ok(handle)
    }

    async fn edit_message(
        &mut self,
        handle: MessageHandle,
        content: &GameEmbed,
    ) -> Result<(), ChatError> {
        if self.stale_after_edits.is_some_and(|n| self.edits >= n) {
            return Err(ChatError::StaleHandle(handle));
        }
        let slot = self
            .messages
            .get_mut(&handle)
            .ok_or(ChatError::StaleHandle(handle))?;
        *slot = content.clone();
        self.edits += 1;
        Ok(())
    }

    async fn add_reactions(
        &mut self,
        handle: MessageHandle,
        symbols: &[&str],
    ) -> Result<(), ChatError> {
        if !self.messages.contains_key(&handle) {
            return Err(ChatError::StaleHandle(handle));
        }
        let attached = self.reactions.entry(handle).or_default();
        for symbol in symbols {
            attached.push(symbol.to_string());
            self.registered.push(symbol.to_string());
        }
        Ok(())
    }

    async fn clear_reactions(&mut self, handle: MessageHandle) -> Result<(), ChatError> {
        self.clear_calls += 1;
        self.reactions.remove(&handle);
        Ok(())
    }

    async fn next_reaction(&mut self, _handle: MessageHandle) -> Option<ReactionEvent> {
        self.events.recv().await
    }
}
