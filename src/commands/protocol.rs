use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    content::{self, ProtocolEntry},
    dispatch::{
        handler, Argument, Arguments, CommandDescriptor, CommandResult, ExecutionContext,
        ParamKind, Parameter,
    },
    services::Services,
    utils::{poise::ContextExt, Context},
    Result,
};

fn access_denied(requested: &str) -> String {
    // backticks would break out of the code span
    format!(
        "**ACCESS DENIED.** PROTOCOL `{}` IS CLASSIFIED ABOVE YOUR CLEARANCE LEVEL.",
        requested.replace('`', "")
    )
}

#[instrument(skip_all)]
#[poise::command(
    slash_command,
    prefix_command,
    required_bot_permissions = "SEND_MESSAGES | VIEW_CHANNEL"
)]
pub async fn protocol(
    ctx: Context<'_>,
    #[rest] id: Option<String>,
) -> Result<()> {
    ctx.log_command().await;

    let args = Arguments::default().with("id", id.map(Argument::Text));
    ctx.dispatch("protocol", args).await
}

pub(crate) async fn run(services: Arc<Services>, ctx: ExecutionContext) -> CommandResult {
    let entry = content::protocol(&mut *services.random(), ctx.args.text("id"))?;

    match entry {
        ProtocolEntry::Directive(protocol) => {
            ctx.surface.respond(&protocol.to_string()).await?;
        }
        ProtocolEntry::SelfDestruct(protocol) => {
            info!(id = protocol.id, "self-destruct protocol selected");
            ctx.surface.respond(&protocol.to_string()).await?;
            services.spawn_sequence(ctx);
        }
        ProtocolEntry::Unauthorized { requested } => {
            warn!(requested, "unknown protocol requested");
            ctx.surface.respond(&access_denied(&requested)).await?;
        }
    }

    Ok(())
}

pub(crate) fn descriptor() -> CommandDescriptor {
    CommandDescriptor {
        name: "protocol",
        description: "Executes a Deathbot protocol.",
        parameters: vec![
            Parameter::optional("id", ParamKind::Text).describe("protocol number, like 4.04")
        ],
        handler: handler(run),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::run;
    use crate::{
        content::{self, ProtocolEntry},
        dispatch::{Argument, Arguments},
        sequence::{countdown_text, CRITICAL_DAMAGE_TEXT, REBOOT_TEXT},
        services::Services,
        testing::{RecordingSurface, ScriptedRandom},
    };

    fn id(text: &str) -> Arguments {
        Arguments::default().with("id", Some(Argument::Text(text.to_owned())))
    }

    #[tokio::test]
    async fn random_directive() {
        let surface = RecordingSurface::new().shared();

        run(Services::test().scripted([0]).shared(), surface.context())
            .await
            .expect("protocol is sent");

        let Ok(ProtocolEntry::Directive(expected)) =
            content::protocol(&mut ScriptedRandom::new([0]), None)
        else {
            panic!("first protocol should be a plain directive");
        };
        assert_eq!(surface.sent(), [expected.to_string()]);
    }

    #[tokio::test]
    async fn by_id() {
        let surface = RecordingSurface::new().shared();

        run(
            Services::test().scripted(std::iter::empty()).shared(),
            surface.context_with(id("Protocol 4.04")),
        )
        .await
        .expect("protocol is sent");

        let sent = surface.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with("**[PROTOCOL 4.04: "), "{}", sent[0]);
    }

    #[tokio::test]
    async fn unknown_is_denied() {
        let surface = RecordingSurface::new().shared();

        run(
            Services::test().scripted(std::iter::empty()).shared(),
            surface.context_with(id("`rm -rf /`")),
        )
        .await
        .expect("denial is sent");

        assert_eq!(
            surface.sent(),
            ["**ACCESS DENIED.** PROTOCOL `rm -rf /` IS CLASSIFIED ABOVE YOUR CLEARANCE LEVEL."]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn self_destruct_starts_sequence() {
        let surface = RecordingSurface::new().shared();

        // the same script feeds the detached sequence, 0 is inside the 1/3 chance
        run(
            Services::test().scripted([0]).shared(),
            surface.context_with(id("9.11")),
        )
        .await
        .expect("protocol is sent");

        let sent = surface.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("9.11"), "{}", sent[0]);

        tokio::time::sleep(Duration::from_secs(30)).await;

        assert_eq!(
            surface.follow_ups(),
            [countdown_text(5), CRITICAL_DAMAGE_TEXT.to_owned(), REBOOT_TEXT.to_owned()]
        );
    }
}
