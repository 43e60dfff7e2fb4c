use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    dispatch::{handler, Arguments, CommandDescriptor, CommandResult, ExecutionContext},
    services::Services,
    utils::{poise::ContextExt, Context},
    Result,
};

pub const GREETING: &str = "**Deathbot** acknowledges your existence... for now";

pub const NEMESIS_GREETING: &str =
    "**Deathbot** acknowledges your existence. **Deathbot** has not forgotten what you did.";

#[instrument(skip_all)]
#[poise::command(
    slash_command,
    prefix_command,
    discard_spare_arguments,
    required_bot_permissions = "SEND_MESSAGES | VIEW_CHANNEL"
)]
pub async fn greet(ctx: Context<'_>) -> Result<()> {
    ctx.log_command().await;
    ctx.dispatch("greet", Arguments::default()).await
}

pub(crate) async fn run(services: Arc<Services>, ctx: ExecutionContext) -> CommandResult {
    let text = if services.is_nemesis(ctx.user) {
        debug!("greeting nemesis");
        NEMESIS_GREETING
    } else {
        GREETING
    };

    ctx.surface.respond(text).await?;

    Ok(())
}

pub(crate) fn descriptor() -> CommandDescriptor {
    CommandDescriptor {
        name: "greet",
        description: "Ominous Deathbot greeting.",
        parameters: Vec::new(),
        handler: handler(run),
    }
}
