use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use futures::{stream::BoxStream, StreamExt};
use poise::serenity_prelude::{
    self as serenity, ActivityData, ChannelId, CommandInteraction, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, CreateMessage,
    EditInteractionResponse, EditMessage, GuildId, MessageId, UserId,
};
use tracing::trace;

use crate::{
    surface::{MessageHandle, Presence, Result, Surface, SurfaceError},
    utils::Context,
};

/// Where the invocation came from.
enum Origin {
    Interaction(Box<CommandInteraction>),
    /// A prefix command message.
    Message { channel: ChannelId, id: MessageId },
}

pub struct DiscordSurface {
    ctx: serenity::Context,
    origin: Origin,
    responded: AtomicBool,
    invoker: UserId,
    guild: Option<GuildId>,
    activity: Option<ActivityData>,
}

impl DiscordSurface {
    /// Takes what it needs out of `ctx`, so the surface can outlive the command.
    pub fn new(ctx: Context<'_>, activity: Option<ActivityData>) -> Self {
        let (origin, responded) = match ctx {
            poise::Context::Application(app) => (
                Origin::Interaction(Box::new(app.interaction.clone())),
                app.has_sent_initial_response.load(Ordering::SeqCst),
            ),
            poise::Context::Prefix(prefix) => (
                Origin::Message {
                    channel: prefix.msg.channel_id,
                    id: prefix.msg.id,
                },
                false,
            ),
        };

        Self {
            ctx: ctx.serenity_context().clone(),
            origin,
            responded: AtomicBool::new(responded),
            invoker: ctx.author().id,
            guild: ctx.guild_id(),
            activity,
        }
    }
}

#[async_trait]
impl Surface for DiscordSurface {
    async fn send_initial_reply(&self, text: &str) -> Result<MessageHandle> {
        if self.responded.load(Ordering::SeqCst) {
            return Err(SurfaceError::AlreadyResponded);
        }

        let handle = match &self.origin {
            Origin::Interaction(interaction) => {
                let response = CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new().content(text),
                );
                interaction.create_response(&self.ctx, response).await?;

                MessageHandle::Original
            }
            Origin::Message { channel, id } => {
                let builder = CreateMessage::new()
                    .content(text)
                    .reference_message((*channel, *id));
                let message = channel.send_message(&self.ctx, builder).await?;

                MessageHandle::Message {
                    channel: message.channel_id,
                    id: message.id,
                }
            }
        };

        self.responded.store(true, Ordering::SeqCst);
        trace!(?handle, "initial reply sent");

        Ok(handle)
    }

    async fn send_follow_up(&self, text: &str) -> Result<MessageHandle> {
        let handle = match &self.origin {
            Origin::Interaction(interaction) => {
                let builder = CreateInteractionResponseFollowup::new().content(text);
                let message = interaction.create_followup(&self.ctx, builder).await?;

                MessageHandle::FollowUp(message.id)
            }
            Origin::Message { channel, .. } => {
                let message = channel.say(&self.ctx, text).await?;

                MessageHandle::Message {
                    channel: message.channel_id,
                    id: message.id,
                }
            }
        };

        trace!(?handle, "follow-up sent");

        Ok(handle)
    }

    async fn edit_message(&self, handle: &MessageHandle, text: &str) -> Result<()> {
        match (handle, &self.origin) {
            (MessageHandle::Original, Origin::Interaction(interaction)) => {
                let builder = EditInteractionResponse::new().content(text);
                interaction.edit_response(&self.ctx, builder).await?;
            }
            (MessageHandle::FollowUp(id), Origin::Interaction(interaction)) => {
                let builder = CreateInteractionResponseFollowup::new().content(text);
                interaction.edit_followup(&self.ctx, *id, builder).await?;
            }
            (MessageHandle::Message { channel, id }, _) => {
                let builder = EditMessage::new().content(text);
                channel.edit_message(&self.ctx, *id, builder).await?;
            }
            _ => return Err(SurfaceError::StaleHandle),
        }

        Ok(())
    }

    fn set_presence(&self, presence: Presence) {
        trace!(?presence);
        self.ctx.set_presence(self.activity.clone(), presence.into());
    }

    fn members(&self) -> BoxStream<'_, Result<UserId>> {
        match self.guild {
            Some(guild) => guild
                .members_iter(&self.ctx)
                .map(|member| member.map(|member| member.user.id).map_err(SurfaceError::from))
                .boxed(),
            // a dm only has two people in it
            None => futures::stream::iter([Ok(self.invoker), Ok(self.current_user())]).boxed(),
        }
    }

    fn current_user(&self) -> UserId {
        self.ctx.cache.current_user().id
    }
}
