use std::sync::Arc;

use tracing::instrument;

use crate::{
    dispatch::{handler, Arguments, CommandDescriptor, CommandResult, ExecutionContext},
    services::Services,
    utils::{poise::ContextExt, Context},
    Result,
};

pub const BANNER: &str =
    "*Bootup Complete.* **⚠️ THIS UNIT IS FULLY FUNCTIONAL. GREETINGS, HUMAN.**";

#[instrument(skip_all)]
#[poise::command(
    prefix_command,
    discard_spare_arguments,
    required_bot_permissions = "SEND_MESSAGES | VIEW_CHANNEL"
)]
pub async fn bootup(ctx: Context<'_>) -> Result<()> {
    ctx.log_command().await;
    ctx.dispatch("bootup", Arguments::default()).await
}

pub(crate) async fn run(_: Arc<Services>, ctx: ExecutionContext) -> CommandResult {
    ctx.surface.respond(BANNER).await?;
    Ok(())
}

pub(crate) fn descriptor() -> CommandDescriptor {
    CommandDescriptor {
        name: "bootup",
        description: "Deathbot bootup banner.",
        parameters: Vec::new(),
        handler: handler(run),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{run, BANNER};
    use crate::{services::Services, testing::RecordingSurface};

    #[tokio::test]
    async fn banner() {
        let surface = RecordingSurface::new().shared();

        run(Services::test().shared(), surface.context())
            .await
            .expect("banner is sent");

        assert_eq!(surface.sent(), [BANNER]);
    }
}
