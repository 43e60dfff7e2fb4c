use std::sync::Arc;

use tracing::{info, trace};

use crate::{
    discord::DiscordSurface,
    dispatch::{Arguments, ExecutionContext},
    errors::Error,
    Data,
};

pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type Command = poise::Command<Data, Error>;

pub trait ContextExt {
    async fn log_command(&self);

    /// Everything the dispatcher needs, detached from poise's borrows.
    fn execution_context(&self, args: Arguments) -> ExecutionContext;

    /// Hands the invocation to the dispatcher.
    ///
    /// Handler failures have already been reported by the time this returns,
    /// so only dispatch errors come back.
    async fn dispatch(&self, name: &str, args: Arguments) -> crate::Result<()>;
}

impl ContextExt for Context<'_> {
    async fn log_command(&self) {
        let channel = self
            .channel_id()
            .name(self.http())
            .await
            .map_or("dms".to_string(), |c| format!("#{c}"));
        info!(
            "@{} ({}): {}",
            self.author().name,
            channel,
            self.invocation_string()
        );
    }

    fn execution_context(&self, args: Arguments) -> ExecutionContext {
        let surface = DiscordSurface::new(*self, self.data().activity.clone());

        ExecutionContext {
            user: self.author().id,
            user_name: self.author().name.clone(),
            channel: self.channel_id(),
            guild: self.guild_id(),
            args,
            surface: Arc::new(surface),
        }
    }

    async fn dispatch(&self, name: &str, args: Arguments) -> crate::Result<()> {
        let completion = self
            .data()
            .dispatcher
            .dispatch(name, self.execution_context(args))
            .await?;

        trace!(?completion);

        Ok(())
    }
}
