use std::time::Duration;

use poise::serenity_prelude::{ActivityData, ChannelId, GuildId, UserId};
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::{
    escalation::PrivilegedOperators, random::Chance, sequence::SequenceSettings,
};

const DEFAULT_PATH: &str = "./deathbot.toml";

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub bot: BotConfig,
    /// Users who get full error details.
    #[serde(default)]
    pub operators: Vec<UserId>,
    #[serde(default)]
    pub identities: Identities,
    #[serde(default)]
    pub sequence: SequenceConfig,
}

impl Config {
    /// Loads `.env`, then the TOML file named by `DEATHBOT_TOML`,
    /// then any `DEATHBOT__SECTION__KEY` overrides from the environment.
    #[tracing::instrument(name = "config")]
    pub fn load() -> Result<Self, Error> {
        dotenvy::dotenv().ok();

        let path = if let Ok(path) = std::env::var("DEATHBOT_TOML") {
            info!(path, "looking for config file with DEATHBOT_TOML...");
            path
        } else {
            warn!(path = DEFAULT_PATH, "DEATHBOT_TOML env unset, using default path");
            DEFAULT_PATH.to_owned()
        };

        let config = Self::from_source(::config::File::new(&path, ::config::FileFormat::Toml))?;
        info!("config loaded");

        Ok(config)
    }

    fn from_source<S>(source: S) -> Result<Self, Error>
    where
        S: ::config::Source + Send + Sync + 'static,
    {
        ::config::Config::builder()
            .add_source(source)
            .add_source(::config::Environment::with_prefix("DEATHBOT").separator("__"))
            .build()
            .map_err(Error::Read)?
            .try_deserialize()
            .map_err(Error::Parse)
    }

    pub fn operators(&self) -> PrivilegedOperators {
        if self.operators.is_empty() {
            warn!("no operators configured, error details will never be shown");
        }

        PrivilegedOperators::new(self.operators.iter().copied())
    }

    pub fn token() -> Result<String, Error> {
        std::env::var("DISCORD_TOKEN").map_err(|_| Error::MissingToken)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("file read error: {0}")]
    Read(::config::ConfigError),

    #[error("parsing error: {0}")]
    Parse(::config::ConfigError),

    #[error("DISCORD_TOKEN is not set")]
    MissingToken,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BotConfig {
    testing_server: Option<GuildId>,
    activity: Option<String>,
    prefix: String,
    status_channel: Option<ChannelId>,
}

impl BotConfig {
    pub fn testing_server(&self) -> Option<&GuildId> {
        if self.testing_server.is_none() {
            warn!("no testing server set in config, commands will only be registered globally");
        }

        self.testing_server.as_ref()
    }

    pub fn activity(&self) -> Option<ActivityData> {
        let Some(activity) = &self.activity else {
            warn!("no bot.activity provided in config, defaulting to none");
            return None;
        };

        if activity.is_empty() {
            warn!("bot.activity provided in config as empty string, defaulting to none");
            return None;
        }

        let parsed_activity = if let Some(name) = activity.strip_prefix("playing ") {
            ActivityData::playing(name)
        } else if let Some(name) = activity.strip_prefix("listening to ") {
            ActivityData::listening(name)
        } else if let Some(name) = activity.strip_prefix("watching ") {
            ActivityData::watching(name)
        } else if let Some(name) = activity.strip_prefix("competing in ") {
            ActivityData::competing(name)
        } else {
            error!("bot.activity in config could not be parsed - must start with `playing`, `listening to`, `watching` or `competing in`");
            warn!("disabling bot activity");
            return None;
        };

        debug!(
            "bot.activity parsed as {:?}: {}",
            parsed_activity.kind, parsed_activity.name
        );
        info!("successfully parsed bot activity from config");

        Some(parsed_activity)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn status_channel(&self) -> Option<ChannelId> {
        self.status_channel
    }
}

/// Users who get special treatment from some commands.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Identities {
    /// Can't be threatened.
    pub creator: Option<UserId>,
    /// Gets a less friendly greeting.
    pub nemesis: Option<UserId>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SequenceConfig {
    trigger_chance: Chance,
    tick_ms: u64,
    settle_ms: u64,
    warning_ms: u64,
    blackout_ms: u64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            trigger_chance: Chance::default(),
            tick_ms: 500,
            settle_ms: 1000,
            warning_ms: 2000,
            blackout_ms: 10_000,
        }
    }
}

impl SequenceConfig {
    pub fn settings(&self) -> SequenceSettings {
        SequenceSettings {
            tick: Duration::from_millis(self.tick_ms),
            settle: Duration::from_millis(self.settle_ms),
            warning: Duration::from_millis(self.warning_ms),
            blackout: Duration::from_millis(self.blackout_ms),
            trigger_chance: self.trigger_chance,
        }
    }
}
