use std::collections::HashSet;

use futures::StreamExt;
use poise::serenity_prelude::UserId;
use tracing::{instrument, trace};

use crate::surface::{Result, Surface};

/// Users allowed to see the full details of an error.
#[derive(Debug, Clone, Default)]
pub struct PrivilegedOperators {
    ids: HashSet<UserId>,
}

impl PrivilegedOperators {
    pub fn new(ids: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Checks whether any operator can currently see the invocation's channel.
    ///
    /// Stops pulling members as soon as one matches.
    #[instrument(skip_all)]
    pub async fn present_in(&self, surface: &dyn Surface) -> Result<bool> {
        if self.is_empty() {
            trace!("no operators configured");
            return Ok(false);
        }

        let mut members = surface.members();
        while let Some(member) = members.next().await {
            let member = member?;

            if self.contains(member) {
                trace!(%member, "found operator");
                return Ok(true);
            }
        }

        Ok(false)
    }
}
