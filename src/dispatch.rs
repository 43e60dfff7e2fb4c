use std::{collections::HashMap, future::Future, sync::Arc};

use futures::future::BoxFuture;
use poise::serenity_prelude::{ChannelId, GuildId, UserId};
use tracing::{debug, instrument};

use crate::{errors::CommandError, escalation::guarded, services::Services, surface::Surface};

pub type CommandResult = Result<(), CommandError>;

pub type Handler =
    Arc<dyn Fn(Arc<Services>, ExecutionContext) -> BoxFuture<'static, CommandResult> + Send + Sync>;

/// A handler that has been through [`guarded`], so it can't fail.
pub type GuardedHandler =
    Arc<dyn Fn(Arc<Services>, ExecutionContext) -> BoxFuture<'static, Completion> + Send + Sync>;

/// Turns an async fn into a [`Handler`].
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(Arc<Services>, ExecutionContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CommandResult> + Send + 'static,
{
    Arc::new(move |services, ctx| Box::pin(f(services, ctx)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Succeeded,
    /// The handler failed and the failure was reported.
    Escalated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Text(String),
    User(UserId),
}

impl Argument {
    const fn kind(&self) -> ParamKind {
        match self {
            Self::Text(_) => ParamKind::Text,
            Self::User(_) => ParamKind::User,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments(Vec<(&'static str, Argument)>);

impl Arguments {
    pub fn with(mut self, name: &'static str, argument: Option<Argument>) -> Self {
        if let Some(argument) = argument {
            self.0.push((name, argument));
        }

        self
    }

    fn get(&self, name: &str) -> Option<&Argument> {
        self.0
            .iter()
            .find(|(arg_name, _)| *arg_name == name)
            .map(|(_, arg)| arg)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(Argument::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn user(&self, name: &str) -> Option<UserId> {
        match self.get(name) {
            Some(Argument::User(id)) => Some(*id),
            _ => None,
        }
    }
}

/// Everything a handler knows about one invocation.
#[derive(Clone)]
pub struct ExecutionContext {
    pub user: UserId,
    pub user_name: String,
    pub channel: ChannelId,
    /// `None` in DMs.
    pub guild: Option<GuildId>,
    pub args: Arguments,
    pub surface: Arc<dyn Surface>,
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("user", &self.user)
            .field("user_name", &self.user_name)
            .field("channel", &self.channel)
            .field("guild", &self.guild)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: Option<&'static str>,
}

impl Parameter {
    pub const fn optional(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            description: None,
        }
    }

    pub const fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

pub struct CommandDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Vec<Parameter>,
    pub handler: Handler,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no command named `{0}`")]
    UnknownCommand(String),

    #[error("`{command}` needs a `{parameter}` argument")]
    MissingArgument {
        command: &'static str,
        parameter: &'static str,
    },

    #[error("`{command}` got the wrong kind of value for `{parameter}`")]
    WrongArgument {
        command: &'static str,
        parameter: &'static str,
    },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command `{0}` is already registered")]
    Duplicate(&'static str),
}

struct Entry {
    name: &'static str,
    parameters: Vec<Parameter>,
    run: GuardedHandler,
}

impl Entry {
    fn check(&self, args: &Arguments) -> Result<(), DispatchError> {
        for parameter in &self.parameters {
            match args.get(parameter.name) {
                None if parameter.required => {
                    return Err(DispatchError::MissingArgument {
                        command: self.name,
                        parameter: parameter.name,
                    })
                }
                Some(arg) if arg.kind() != parameter.kind => {
                    return Err(DispatchError::WrongArgument {
                        command: self.name,
                        parameter: parameter.name,
                    })
                }
                _ => (),
            }
        }

        Ok(())
    }
}

/// Looks up commands by name and runs them behind the error escalation middleware.
pub struct Dispatcher {
    services: Arc<Services>,
    commands: HashMap<&'static str, Entry>,
}

impl Dispatcher {
    pub fn new(services: Arc<Services>) -> Self {
        Self {
            services,
            commands: HashMap::new(),
        }
    }

    /// A dispatcher with every built-in command registered.
    pub fn standard(services: Arc<Services>) -> Result<Self, RegistryError> {
        let mut dispatcher = Self::new(services);

        for descriptor in crate::commands::descriptors() {
            dispatcher.register(descriptor)?;
        }

        Ok(dispatcher)
    }

    pub fn register(&mut self, descriptor: CommandDescriptor) -> Result<(), RegistryError> {
        if self.commands.contains_key(descriptor.name) {
            return Err(RegistryError::Duplicate(descriptor.name));
        }

        self.commands.insert(
            descriptor.name,
            Entry {
                name: descriptor.name,
                parameters: descriptor.parameters,
                run: guarded(descriptor.handler),
            },
        );

        Ok(())
    }

    #[cfg(test)]
    pub fn parameters(&self, name: &str) -> Option<&[Parameter]> {
        self.commands
            .get(name)
            .map(|entry| entry.parameters.as_slice())
    }

    #[instrument(skip(self, ctx), fields(user = %ctx.user_name))]
    pub async fn dispatch(
        &self,
        name: &str,
        ctx: ExecutionContext,
    ) -> Result<Completion, DispatchError> {
        let entry = self
            .commands
            .get(name)
            .ok_or_else(|| DispatchError::UnknownCommand(name.to_owned()))?;

        entry.check(&ctx.args)?;

        let completion = (entry.run)(self.services.clone(), ctx).await;
        debug!(?completion);

        Ok(completion)
    }
}
