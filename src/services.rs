use std::sync::Arc;

use poise::serenity_prelude::UserId;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{info_span, Instrument};

use crate::{
    dispatch::{handler, ExecutionContext},
    escalation::{guarded, PrivilegedOperators},
    framework::config::Identities,
    random::RandomSource,
    sequence::SequenceSettings,
};

pub type RandomFactory = Arc<dyn Fn() -> Box<dyn RandomSource> + Send + Sync>;

/// Shared, read-only state handed to every command handler.
pub struct Services {
    operators: PrivilegedOperators,
    identities: Identities,
    sequence: SequenceSettings,
    random: RandomFactory,
}

impl Services {
    pub fn new(
        operators: PrivilegedOperators,
        identities: Identities,
        sequence: SequenceSettings,
    ) -> Self {
        Self {
            operators,
            identities,
            sequence,
            random: Arc::new(|| -> Box<dyn RandomSource> { Box::new(StdRng::from_entropy()) }),
        }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub const fn operators(&self) -> &PrivilegedOperators {
        &self.operators
    }

    pub const fn sequence(&self) -> &SequenceSettings {
        &self.sequence
    }

    /// A fresh random source for one invocation.
    pub fn random(&self) -> Box<dyn RandomSource> {
        (self.random)()
    }

    pub fn is_creator(&self, user: UserId) -> bool {
        self.identities.creator == Some(user)
    }

    pub fn is_nemesis(&self, user: UserId) -> bool {
        self.identities.nemesis == Some(user)
    }

    /// Starts a self-destruct sequence in the background.
    ///
    /// The sequence is guarded on its own, so whatever happens to it is reported
    /// separately from the command that started it.
    pub fn spawn_sequence(self: &Arc<Self>, ctx: ExecutionContext) {
        let run = guarded(handler(crate::commands::selfdestruct::run));
        let span = info_span!("sequence", user = %ctx.user_name);

        tokio::spawn(run(self.clone(), ctx).instrument(span));
    }
}

#[cfg(test)]
impl Services {
    pub fn test() -> Self {
        Self::new(
            PrivilegedOperators::default(),
            Identities::default(),
            SequenceSettings::default(),
        )
    }

    pub fn with_operators(mut self, ids: impl IntoIterator<Item = UserId>) -> Self {
        self.operators = PrivilegedOperators::new(ids);
        self
    }

    pub fn with_identities(mut self, identities: Identities) -> Self {
        self.identities = identities;
        self
    }

    /// Every random source handed out replays `values`.
    pub fn scripted(mut self, values: impl IntoIterator<Item = usize>) -> Self {
        let script = crate::testing::ScriptedRandom::new(values);
        self.random = Arc::new(move || -> Box<dyn RandomSource> { Box::new(script.clone()) });
        self
    }
}
