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
pub async fn diagnostic(ctx: Context<'_>) -> Result<()> {
    ctx.log_command().await;
    ctx.dispatch("diagnostic", Arguments::default()).await
}

pub(crate) async fn run(services: Arc<Services>, ctx: ExecutionContext) -> CommandResult {
    let report = content::diagnostic_report(&mut *services.random())?;
    ctx.surface.respond(&report).await?;

    Ok(())
}

pub(crate) fn descriptor() -> CommandDescriptor {
    CommandDescriptor {
        name: "diagnostic",
        description: "Deathbot self-diagnostic report.",
        parameters: Vec::new(),
        handler: handler(run),
    }
}
