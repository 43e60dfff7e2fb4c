use poise::serenity_prelude::ActivityData;
use tracing::info;

use crate::{
    dispatch::{Dispatcher, RegistryError},
    services::Services,
};

use super::Config;

/// Poise's user data, shared by every command.
pub struct Data {
    pub(crate) config: Config,
    pub(crate) dispatcher: Dispatcher,
    /// Parsed once, reused whenever presence changes.
    pub(crate) activity: Option<ActivityData>,
}

impl Data {
    pub fn new(config: Config) -> Result<Self, RegistryError> {
        let services = Services::new(
            config.operators(),
            config.identities.clone(),
            config.sequence.settings(),
        );

        let dispatcher = Dispatcher::standard(services.shared())?;
        let activity = config.bot.activity();

        info!(
            trigger_chance = %config.sequence.settings().trigger_chance,
            "services ready"
        );

        Ok(Self {
            config,
            dispatcher,
            activity,
        })
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }
}
