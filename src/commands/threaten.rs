use std::sync::Arc;

use poise::serenity_prelude::{Mentionable, User};
use tracing::{info, instrument};

use crate::{
    content,
    dispatch::{
        handler, Argument, Arguments, CommandDescriptor, CommandResult, ExecutionContext,
        ParamKind, Parameter,
    },
    services::Services,
    utils::{poise::ContextExt, Context},
    Result,
};

pub const SELF_THREAT: &str =
    "**[WARNING]:** HOSTILE INTENT DIRECTED AT DEATHBOT. ENGAGING COUNTERMEASURES.";

pub const CREATOR_SPARED: &str =
    "**[ERROR]:** TARGET IS DEATHBOT'S CREATOR. THREAT PROTOCOLS LOCKED.";

#[instrument(skip_all)]
#[poise::command(
    slash_command,
    prefix_command,
    discard_spare_arguments,
    required_bot_permissions = "SEND_MESSAGES | VIEW_CHANNEL"
)]
pub async fn threaten(
    ctx: Context<'_>,
    target: Option<User>,
) -> Result<()> {
    ctx.log_command().await;

    let args = Arguments::default().with("target", target.map(|user| Argument::User(user.id)));
    ctx.dispatch("threaten", args).await
}

pub(crate) async fn run(services: Arc<Services>, ctx: ExecutionContext) -> CommandResult {
    let target = ctx.args.user("target").unwrap_or(ctx.user);

    if target == ctx.surface.current_user() {
        info!("deathbot was threatened, starting sequence");
        ctx.surface.respond(SELF_THREAT).await?;
        services.spawn_sequence(ctx);
        return Ok(());
    }

    if services.is_creator(target) {
        ctx.surface.respond(CREATOR_SPARED).await?;
        return Ok(());
    }

    let threat = content::threat(&mut *services.random())?;
    ctx.surface
        .respond(&format!("{}: {threat}", target.mention()))
        .await?;

    Ok(())
}

pub(crate) fn descriptor() -> CommandDescriptor {
    CommandDescriptor {
        name: "threaten",
        description: "Deathbot threatens a user.",
        parameters: vec![
            Parameter::optional("target", ParamKind::User).describe("who to threaten")
        ],
        handler: handler(run),
    }
}
