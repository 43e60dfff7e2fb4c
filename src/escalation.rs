use std::{error::Error as StdError, fmt::Write, sync::Arc};

use tracing::{error, instrument, warn};

use crate::{
    dispatch::{Completion, ExecutionContext, GuardedHandler, Handler},
    errors::CommandError,
};

mod operators;
pub use operators::PrivilegedOperators;

pub const APOLOGY: &str = "**[ERROR]:** *An internal error has occurred.* \
    Deathbot's operators have been notified. Deathbot apologizes for nothing.";

/// Every cause of `error`, outermost first, one per line.
fn causes(error: &dyn StdError) -> String {
    let mut text = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        // `write!` to a String can't fail
        let _ = write!(text, "\ncaused by: {cause}");
        source = cause.source();
    }

    text
}

/// The error message shown to the channel.
///
/// Operators get the whole story, everyone else gets an apology.
pub fn compose(fault: &CommandError, privileged: bool) -> String {
    if privileged {
        format!(
            "**[ERROR]:** *An internal error has occurred:*\n```\n{}\n```",
            causes(fault)
        )
    } else {
        APOLOGY.to_owned()
    }
}

/// Logs a failed command and tells the channel about it.
///
/// Never fails: problems while checking for operators or sending the message
/// are logged and dropped.
#[instrument(skip_all, fields(user = %ctx.user_name))]
pub async fn escalate(
    operators: &PrivilegedOperators,
    ctx: &ExecutionContext,
    fault: &CommandError,
) {
    error!(error = %fault, details = ?fault, "command failed");

    let privileged = operators
        .present_in(ctx.surface.as_ref())
        .await
        .unwrap_or_else(|err| {
            warn!(%err, "couldn't check for privileged operators");
            false
        });

    let message = compose(fault, privileged);

    if let Err(err) = ctx.surface.respond(&message).await {
        error!(%err, "couldn't deliver error message");
    }
}

/// Wraps `handler` so that any error it returns is escalated instead of propagated.
pub fn guarded(handler: Handler) -> GuardedHandler {
    Arc::new(move |services, ctx| {
        let handler = handler.clone();

        Box::pin(async move {
            match handler(services.clone(), ctx.clone()).await {
                Ok(()) => Completion::Succeeded,
                Err(fault) => {
                    escalate(services.operators(), &ctx, &fault).await;
                    Completion::Escalated
                }
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::{guarded, APOLOGY};
    use crate::{
        dispatch::{handler, Completion, ExecutionContext},
        errors::CommandError,
        services::Services,
        surface::SurfaceError,
        testing::{RecordingSurface, BOT, INVOKER, OPERATOR},
    };

    async fn reactor_breach(_: Arc<Services>, _: ExecutionContext) -> Result<(), CommandError> {
        Err(anyhow::anyhow!("reactor breach in sector 7").into())
    }

    async fn wrapped_breach(_: Arc<Services>, _: ExecutionContext) -> Result<(), CommandError> {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "coolant line severed");
        Err(CommandError::Surface(SurfaceError::Serenity(io.into())))
    }

    async fn fine(services: Arc<Services>, ctx: ExecutionContext) -> Result<(), CommandError> {
        let _ = services;
        ctx.surface.respond("all systems nominal").await?;
        Ok(())
    }

    fn services() -> Arc<Services> {
        Services::test().with_operators([OPERATOR]).shared()
    }

    #[tokio::test]
    async fn success_is_untouched() {
        let surface = RecordingSurface::new().shared();

        let completion = guarded(handler(fine))(services(), surface.context()).await;

        assert_eq!(completion, Completion::Succeeded);
        assert_eq!(surface.sent(), ["all systems nominal"]);
    }

    #[tokio::test]
    #[traced_test]
    async fn no_operator_gets_apology() {
        let surface = RecordingSurface::new().with_members([INVOKER, BOT]).shared();

        let completion = guarded(handler(reactor_breach))(services(), surface.context()).await;

        assert_eq!(completion, Completion::Escalated);
        assert_eq!(surface.sent(), [APOLOGY]);
        assert!(!surface.sent()[0].contains("reactor"));
        assert!(logs_contain("reactor breach in sector 7"));
    }

    #[tokio::test]
    async fn operator_gets_details() {
        let surface = RecordingSurface::new()
            .with_members([INVOKER, OPERATOR])
            .shared();

        guarded(handler(reactor_breach))(services(), surface.context()).await;

        let sent = surface.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("reactor breach in sector 7"));
    }

    #[tokio::test]
    async fn operator_sees_causes() {
        let surface = RecordingSurface::new().with_members([OPERATOR]).shared();

        guarded(handler(wrapped_breach))(services(), surface.context()).await;

        let sent = surface.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("coolant line severed"), "{}", sent[0]);
    }

    #[tokio::test]
    #[traced_test]
    async fn failed_lookup_counts_as_absent() {
        let surface = RecordingSurface::new()
            .with_members([INVOKER])
            .failing_members()
            .shared();

        let completion = guarded(handler(reactor_breach))(services(), surface.context()).await;

        assert_eq!(completion, Completion::Escalated);
        assert_eq!(surface.sent(), [APOLOGY]);
        assert!(logs_contain("couldn't check for privileged operators"));
    }

    #[tokio::test]
    async fn follows_up_when_already_responded() {
        let surface = RecordingSurface::new()
            .with_members([OPERATOR])
            .already_responded()
            .shared();

        guarded(handler(reactor_breach))(services(), surface.context()).await;

        let follow_ups = surface.follow_ups();
        assert_eq!(follow_ups.len(), 1);
        assert!(follow_ups[0].contains("reactor breach"));
    }

    #[tokio::test]
    #[traced_test]
    async fn failed_delivery_is_only_logged() {
        let surface = RecordingSurface::new()
            .with_members([OPERATOR])
            .failing_delivery()
            .shared();

        let completion = guarded(handler(reactor_breach))(services(), surface.context()).await;

        assert_eq!(completion, Completion::Escalated);
        assert!(surface.sent().is_empty());
        assert!(logs_contain("couldn't deliver error message"));
    }
}
