//! Fakes shared by the unit tests.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use futures::{stream::BoxStream, StreamExt};
use poise::serenity_prelude::{self as serenity, ChannelId, MessageId, UserId};
use tokio::time::Instant;

use crate::{
    dispatch::{Arguments, ExecutionContext},
    random::RandomSource,
    surface::{MessageHandle, Presence, Result, Surface, SurfaceError},
};

pub const BOT: UserId = UserId::new(966519580266737715);
pub const INVOKER: UserId = UserId::new(497014954935713802);
pub const OPERATOR: UserId = UserId::new(1000);

/// Hands out a fixed list of values, panicking if it runs dry.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: VecDeque<usize>,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn below(&mut self, bound: usize) -> usize {
        let value = self
            .values
            .pop_front()
            .expect("scripted random source ran out of values");

        assert!(value < bound, "scripted value {value} out of range 0..{bound}");
        value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Reply(String),
    FollowUp(String),
    Edit(MessageHandle, String),
    Presence(Presence),
}

/// A [`Surface`] that writes everything down instead of talking to discord.
#[derive(Debug)]
pub struct RecordingSurface {
    started: Instant,
    events: Mutex<Vec<(Duration, Event)>>,
    responded: AtomicBool,
    next_id: AtomicU64,
    members: Vec<UserId>,
    members_fail: bool,
    members_pulled: AtomicUsize,
    delivery_fails: bool,
    edits_fail: bool,
}

fn offline() -> SurfaceError {
    SurfaceError::Serenity(serenity::Error::Other("recording surface is offline"))
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            events: Mutex::new(Vec::new()),
            responded: AtomicBool::new(false),
            next_id: AtomicU64::new(1),
            members: vec![INVOKER, BOT],
            members_fail: false,
            members_pulled: AtomicUsize::new(0),
            delivery_fails: false,
            edits_fail: false,
        }
    }

    pub fn with_members(mut self, members: impl IntoIterator<Item = UserId>) -> Self {
        self.members = members.into_iter().collect();
        self
    }

    /// Member enumeration errors after yielding the configured members.
    pub fn failing_members(mut self) -> Self {
        self.members_fail = true;
        self
    }

    pub fn already_responded(self) -> Self {
        self.responded.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_delivery(mut self) -> Self {
        self.delivery_fails = true;
        self
    }

    pub fn failing_edits(mut self) -> Self {
        self.edits_fail = true;
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn record(&self, event: Event) {
        self.events
            .lock()
            .expect("lock should not be poisoned")
            .push((self.started.elapsed(), event));
    }

    pub fn timeline(&self) -> Vec<(Duration, Event)> {
        self.events
            .lock()
            .expect("lock should not be poisoned")
            .clone()
    }

    pub fn events(&self) -> Vec<Event> {
        self.timeline().into_iter().map(|(_, event)| event).collect()
    }

    /// Text of every reply and follow-up, in order.
    pub fn sent(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Reply(text) | Event::FollowUp(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn follow_ups(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::FollowUp(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn edits(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Edit(_, text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn presences(&self) -> Vec<Presence> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Presence(presence) => Some(presence),
                _ => None,
            })
            .collect()
    }

    pub fn members_pulled(&self) -> usize {
        self.members_pulled.load(Ordering::SeqCst)
    }

    pub fn context(self: &Arc<Self>) -> ExecutionContext {
        self.context_with(Arguments::default())
    }

    pub fn context_with(self: &Arc<Self>, args: Arguments) -> ExecutionContext {
        ExecutionContext {
            user: INVOKER,
            user_name: "perpetualcacophony".to_owned(),
            channel: ChannelId::new(1),
            guild: None,
            args,
            surface: self.clone(),
        }
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Surface for RecordingSurface {
    async fn send_initial_reply(&self, text: &str) -> Result<MessageHandle> {
        if self.responded.swap(true, Ordering::SeqCst) {
            return Err(SurfaceError::AlreadyResponded);
        }

        if self.delivery_fails {
            return Err(offline());
        }

        self.record(Event::Reply(text.to_owned()));
        Ok(MessageHandle::Original)
    }

    async fn send_follow_up(&self, text: &str) -> Result<MessageHandle> {
        if self.delivery_fails {
            return Err(offline());
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.record(Event::FollowUp(text.to_owned()));
        Ok(MessageHandle::FollowUp(MessageId::new(id)))
    }

    async fn edit_message(&self, handle: &MessageHandle, text: &str) -> Result<()> {
        if self.edits_fail {
            return Err(offline());
        }

        self.record(Event::Edit(*handle, text.to_owned()));
        Ok(())
    }

    fn set_presence(&self, presence: Presence) {
        self.record(Event::Presence(presence));
    }

    fn members(&self) -> BoxStream<'_, Result<UserId>> {
        let pulled = &self.members_pulled;
        let items = self
            .members
            .iter()
            .copied()
            .map(Ok)
            .chain(self.members_fail.then(offline).map(Err));

        futures::stream::iter(items)
            .inspect(move |_| {
                pulled.fetch_add(1, Ordering::SeqCst);
            })
            .boxed()
    }

    fn current_user(&self) -> UserId {
        BOT
    }
}
