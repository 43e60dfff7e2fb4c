use poise::PrefixFrameworkOptions;
use tracing::{info, trace};

use crate::{
    commands,
    errors::{self, Error},
};

use super::Data;

pub fn build(data: Data) -> poise::Framework<Data, Error> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::list(),
            prefix_options: PrefixFrameworkOptions {
                prefix: Some(data.config().bot.prefix().to_string()),
                ..Default::default()
            },
            on_error: errors::handle_framework_error,
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                let http = ctx.http.clone();

                let commands: &[_] = &framework.options().commands;

                if let Some(guild_id) = data.config().bot.testing_server() {
                    poise::builtins::register_in_guild(&http, commands, *guild_id).await?;
                }

                poise::builtins::register_globally(&http, commands).await?;
                info!(count = commands.len(), "registered commands");

                ctx.set_activity(data.activity.clone());

                trace!("finished setup, accepting commands");

                if let Some(status_channel) = data.config().bot.status_channel() {
                    status_channel.say(&http, "ready!").await?;
                }

                Ok(data)
            })
        })
        .build()
}
