use async_trait::async_trait;
use futures::stream::BoxStream;
use poise::serenity_prelude::{self as serenity, ChannelId, MessageId, UserId};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("the initial reply for this invocation was already sent")]
    AlreadyResponded,

    #[error("message handle can't be used from this invocation")]
    StaleHandle,

    #[error("discord error: {0}")]
    Serenity(#[from] serenity::Error),
}

pub type Result<T, E = SurfaceError> = std::result::Result<T, E>;

/// A message the bot sent and may edit later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageHandle {
    /// The initial response to a slash command.
    Original,
    /// A follow-up to a slash command.
    FollowUp(MessageId),
    /// A plain channel message, used for prefix commands.
    Message {
        channel: ChannelId,
        id: MessageId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    Calm,
    Alarmed,
    Hidden,
}

impl From<Presence> for serenity::OnlineStatus {
    fn from(value: Presence) -> Self {
        match value {
            Presence::Calm => Self::Online,
            Presence::Alarmed => Self::DoNotDisturb,
            Presence::Hidden => Self::Invisible,
        }
    }
}

/// Everything a command is allowed to do to the outside world.
///
/// One value is created per invocation; it knows whether the initial reply
/// has been used up.
#[async_trait]
pub trait Surface: Send + Sync {
    /// Fails with [`SurfaceError::AlreadyResponded`] if called twice.
    async fn send_initial_reply(&self, text: &str) -> Result<MessageHandle>;

    async fn send_follow_up(&self, text: &str) -> Result<MessageHandle>;

    async fn edit_message(&self, handle: &MessageHandle, text: &str) -> Result<()>;

    /// Process-global, last write wins.
    fn set_presence(&self, presence: Presence);

    /// Members of the channel the invocation came from, fetched lazily.
    fn members(&self) -> BoxStream<'_, Result<UserId>>;

    fn current_user(&self) -> UserId;

    /// Sends the initial reply, or a follow-up if it's already been used.
    async fn respond(&self, text: &str) -> Result<MessageHandle> {
        match self.send_initial_reply(text).await {
            Err(SurfaceError::AlreadyResponded) => {
                debug!("initial reply already used, sending follow-up");
                self.send_follow_up(text).await
            }
            other => other,
        }
    }
}
