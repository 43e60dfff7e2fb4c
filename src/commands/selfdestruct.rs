use std::sync::Arc;

use tracing::instrument;

use crate::{
    dispatch::{handler, Arguments, CommandDescriptor, CommandResult, ExecutionContext},
    sequence::SequenceEngine,
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
pub async fn selfdestruct(ctx: Context<'_>) -> Result<()> {
    ctx.log_command().await;
    ctx.dispatch("selfdestruct", Arguments::default()).await
}

/// Runs one whole sequence on the invocation's surface.
///
/// Also what detached sequences run, see [`Services::spawn_sequence`].
pub(crate) async fn run(services: Arc<Services>, ctx: ExecutionContext) -> CommandResult {
    let mut rng = services.random();

    SequenceEngine::new(services.sequence(), ctx.surface.as_ref())
        .run(&mut *rng)
        .await?;

    Ok(())
}

pub(crate) fn descriptor() -> CommandDescriptor {
    CommandDescriptor {
        name: "selfdestruct",
        description: "Deathbot selfdestruct sequence.",
        parameters: Vec::new(),
        handler: handler(run),
    }
}
