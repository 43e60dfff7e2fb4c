use std::sync::Arc;

use tracing::instrument;

use crate::{
    content,
    dispatch::{handler, Arguments, CommandDescriptor, CommandResult, ExecutionContext},
    services::Services,
    utils::{poise::ContextExt, Context},
    Result,
};

#[instrument(skip_all)]
#[poise::command(
    slash_command,
    prefix_command,
    discard_spare_arguments,
    required_bot_permissions = "SEND_MESSAGES | VIEW_CHANNEL"
)]
pub async fn loadout(ctx: Context<'_>) -> Result<()> {
    ctx.log_command().await;
    ctx.dispatch("loadout", Arguments::default()).await
}

pub(crate) async fn run(services: Arc<Services>, ctx: ExecutionContext) -> CommandResult {
    let loadout = content::loadout(&mut *services.random())?;
    ctx.surface.respond(&loadout.to_string()).await?;

    Ok(())
}

pub(crate) fn descriptor() -> CommandDescriptor {
    CommandDescriptor {
        name: "loadout",
        description: "Deathbot's current loadout.",
        parameters: Vec::new(),
        handler: handler(run),
    }
}
