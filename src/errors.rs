use poise::{BoxFuture, FrameworkError};

use thiserror::Error as ThisError;
use tracing::{error, error_span, Instrument};
use tracing_unwrap::ResultExt;

use crate::{
    dispatch::{DispatchError, RegistryError},
    random::SelectError,
    sequence::SequenceError,
    surface::SurfaceError,
    Data,
};

/// Errors from inside a command handler. These never reach poise: the
/// escalation middleware reports them to the channel.
#[derive(Debug, ThisError)]
pub enum CommandError {
    #[error("couldn't talk to discord: {0}")]
    Surface(#[from] SurfaceError),

    #[error("random selection failed: {0}")]
    Select(#[from] SelectError),

    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors poise sees.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("command registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] crate::framework::config::Error),

    #[error("serenity error: {0}")]
    Serenity(#[from] poise::serenity_prelude::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub fn handle_framework_error(err: FrameworkError<'_, Data, Error>) -> BoxFuture<()> {
    Box::pin(async {
        match err {
            FrameworkError::Command { error, ctx, .. } => {
                let command = ctx.invoked_command_name();
                let span = error_span!("", command);

                async {
                    error!(%error, "command could not be dispatched");

                    if let Err(err) = ctx.say(error.to_string()).await {
                        error!(%err, "couldn't report dispatch error");
                    }
                }
                .instrument(span)
                .await;
            }
            FrameworkError::MissingBotPermissions {
                missing_permissions,
                ctx,
                ..
            } => {
                let command = ctx.invoked_command_name();
                let span = error_span!("", command);
                let _enter = span.enter();

                error!(%missing_permissions, "bot is missing permissions");
            }
            _ => {
                poise::builtins::on_error(err)
                    .await
                    .expect_or_log("failed to handle framework error");
            }
        };
    })
}
