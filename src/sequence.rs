use std::time::Duration;

use tracing::{debug, info, instrument, trace};

use crate::{
    random::{Chance, RandomSource},
    surface::{MessageHandle, Presence, Surface, SurfaceError},
};

/// Countdown shown when the sequence is announced.
pub const ANNOUNCED_COUNTDOWN: u8 = 5;

/// The countdown moves in half steps, so 4 whole numbers plus zero make 9 ticks.
pub const TICKS: u8 = 9;

pub fn countdown_text(count: u8) -> String {
    format!("**[DEATHBOT PROTOCOL 9.11 ENGAGED]** INITIATING SELF-DESTRUCT SEQUENCE. T-MINUS: **{count}**...")
}

pub const ABORTED_TEXT: &str = "**[DEATHBOT PROTOCOL 9.11 ENGAGED]** T-MINUS: **0**...\n\
    **ERROR:** SAFETY LOCK ENGAGED. SELF DESTRUCTION ABORTED.";

pub const CRITICAL_DAMAGE_TEXT: &str =
    "**[WARNING]:** CRITICAL DAMAGE DETECTED. SHUTDOWN IMMINENT";

pub const REBOOT_TEXT: &str = "**SYSTEM REBOOT COMPLETE.** DAMAGE PATCHED. DEATHBOT IS ONLINE.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceSettings {
    /// How long the alarm stays up on each tick.
    pub tick: Duration,
    /// Pause between the last tick and the outcome.
    pub settle: Duration,
    /// Pause between the damage warning and going dark.
    pub warning: Duration,
    /// How long the bot stays hidden.
    pub blackout: Duration,
    pub trigger_chance: Chance,
}

impl Default for SequenceSettings {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(500),
            settle: Duration::from_secs(1),
            warning: Duration::from_secs(2),
            blackout: Duration::from_secs(10),
            trigger_chance: Chance::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    Aborted,
    Triggered,
}

/// One thing the sequence wants done to the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Reply with the starting countdown and keep track of the message.
    Announce(String),
    Presence(Presence),
    /// Edit the tracked message.
    Edit(String),
    FollowUp(String),
    Wait(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickStage {
    Alarm,
    Edit,
    Wait,
    Calm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TriggeredStage {
    Warn,
    Brace,
    Blackout,
    Dark,
    Restore,
    Reboot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Announce,
    Tick { index: u8, stage: TickStage },
    Settle,
    Decide,
    Triggered(TriggeredStage),
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceState {
    countdown: u8,
    presence: Presence,
    message: Option<MessageHandle>,
    outcome: Outcome,
    phase: Phase,
}

impl Default for SequenceState {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceState {
    pub const fn new() -> Self {
        Self {
            countdown: TICKS - 1,
            presence: Presence::Calm,
            message: None,
            outcome: Outcome::Pending,
            phase: Phase::Announce,
        }
    }

    /// The current tick index, counting down to 0.
    pub const fn countdown(&self) -> u8 {
        self.countdown
    }

    pub const fn presence(&self) -> Presence {
        self.presence
    }

    pub const fn message(&self) -> Option<MessageHandle> {
        self.message
    }

    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn track(&mut self, message: MessageHandle) {
        self.message = Some(message);
    }

    fn presence_step(&mut self, presence: Presence) -> Step {
        self.presence = presence;
        Step::Presence(presence)
    }

    /// Moves the state machine forward by one step.
    ///
    /// Doesn't touch the outside world: the caller is expected to carry out the
    /// returned [`Step`]. Randomness is only consumed once, when the outcome is decided.
    /// Returns `None` once the sequence has finished.
    pub fn advance(
        &mut self,
        settings: &SequenceSettings,
        rng: &mut dyn RandomSource,
    ) -> Option<Step> {
        let (step, next) = match self.phase {
            Phase::Announce => (
                Step::Announce(countdown_text(ANNOUNCED_COUNTDOWN)),
                Phase::Tick {
                    index: TICKS - 1,
                    stage: TickStage::Alarm,
                },
            ),
            Phase::Tick { index, stage } => {
                self.countdown = index;

                match stage {
                    TickStage::Alarm => {
                        let next = if index % 2 == 0 {
                            TickStage::Edit
                        } else {
                            TickStage::Wait
                        };

                        (
                            self.presence_step(Presence::Alarmed),
                            Phase::Tick { index, stage: next },
                        )
                    }
                    TickStage::Edit => (
                        Step::Edit(countdown_text(index / 2)),
                        Phase::Tick {
                            index,
                            stage: TickStage::Wait,
                        },
                    ),
                    TickStage::Wait => (
                        Step::Wait(settings.tick),
                        Phase::Tick {
                            index,
                            stage: TickStage::Calm,
                        },
                    ),
                    TickStage::Calm => {
                        let next = match index.checked_sub(1) {
                            Some(index) => Phase::Tick {
                                index,
                                stage: TickStage::Alarm,
                            },
                            None => Phase::Settle,
                        };

                        (self.presence_step(Presence::Calm), next)
                    }
                }
            }
            Phase::Settle => (Step::Wait(settings.settle), Phase::Decide),
            Phase::Decide => {
                if settings.trigger_chance.roll(rng) {
                    debug!("self-destruct triggered");
                    (
                        self.presence_step(Presence::Alarmed),
                        Phase::Triggered(TriggeredStage::Warn),
                    )
                } else {
                    debug!("self-destruct aborted");
                    self.outcome = Outcome::Aborted;
                    (Step::Edit(ABORTED_TEXT.to_owned()), Phase::Done)
                }
            }
            Phase::Triggered(stage) => match stage {
                TriggeredStage::Warn => (
                    Step::FollowUp(CRITICAL_DAMAGE_TEXT.to_owned()),
                    Phase::Triggered(TriggeredStage::Brace),
                ),
                TriggeredStage::Brace => (
                    Step::Wait(settings.warning),
                    Phase::Triggered(TriggeredStage::Blackout),
                ),
                TriggeredStage::Blackout => (
                    self.presence_step(Presence::Hidden),
                    Phase::Triggered(TriggeredStage::Dark),
                ),
                TriggeredStage::Dark => (
                    Step::Wait(settings.blackout),
                    Phase::Triggered(TriggeredStage::Restore),
                ),
                TriggeredStage::Restore => (
                    self.presence_step(Presence::Calm),
                    Phase::Triggered(TriggeredStage::Reboot),
                ),
                TriggeredStage::Reboot => {
                    self.outcome = Outcome::Triggered;
                    (Step::FollowUp(REBOOT_TEXT.to_owned()), Phase::Done)
                }
            },
            Phase::Done => return None,
        };

        self.phase = next;
        Some(step)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SequenceError {
    #[error("self-destruct sequence failed at tick {tick}: {source}")]
    Surface {
        tick: u8,
        #[source]
        source: SurfaceError,
    },

    #[error("self-destruct sequence tried to edit before announcing")]
    Untracked,
}

/// Drives a [`SequenceState`] from announcement to outcome against a [`Surface`].
pub struct SequenceEngine<'a> {
    settings: &'a SequenceSettings,
    surface: &'a dyn Surface,
}

impl<'a> SequenceEngine<'a> {
    pub fn new(settings: &'a SequenceSettings, surface: &'a dyn Surface) -> Self {
        Self { settings, surface }
    }

    #[instrument(skip_all, fields(chance = %self.settings.trigger_chance))]
    pub async fn run(&self, rng: &mut dyn RandomSource) -> Result<SequenceState, SequenceError> {
        let mut state = SequenceState::new();

        while let Some(step) = state.advance(self.settings, rng) {
            trace!(?step, tick = state.countdown());

            if let Err(err) = self.perform(&mut state, step).await {
                // don't leave the bot stuck on do not disturb
                if state.presence() != Presence::Calm {
                    self.surface.set_presence(Presence::Calm);
                }

                return Err(err);
            }
        }

        debug_assert!(state.is_finished());
        info!(
            outcome = ?state.outcome(),
            presence = ?state.presence(),
            "self-destruct sequence finished"
        );
        Ok(state)
    }

    async fn perform(&self, state: &mut SequenceState, step: Step) -> Result<(), SequenceError> {
        let tick = state.countdown();
        let failed = |source| SequenceError::Surface { tick, source };

        match step {
            Step::Announce(text) => {
                let message = self.surface.respond(&text).await.map_err(failed)?;
                state.track(message);
            }
            Step::Presence(presence) => self.surface.set_presence(presence),
            Step::Edit(text) => {
                let message = state.message().ok_or(SequenceError::Untracked)?;
                self.surface
                    .edit_message(&message, &text)
                    .await
                    .map_err(failed)?;
            }
            Step::FollowUp(text) => {
                self.surface.send_follow_up(&text).await.map_err(failed)?;
            }
            Step::Wait(duration) => tokio::time::sleep(duration).await,
        }

        Ok(())
    }
}
