//! Staged transmission of a single codeword.
//!
//! Presentation layers reveal a transmission in steps: the codeword leaves
//! the sender, crosses the channel, and is handed to the receiver. This
//! module models those steps as an explicit state machine advanced by
//! external ticks, so the engine itself never sleeps or schedules timers.
//!
//! # State Machine
//!
//! ```text
//!            start()            tick()                tick()
//!   Idle ─────────────> Sending ──────> Transmitted ──────> Complete
//!                          ^     (channel runs here)           │
//!                          └────────────── start() ────────────┘
//! ```

use crate::bitstring::BitString;
use crate::channel::{ChannelOutcome, NoisyChannel};
use std::collections::BTreeSet;
use std::time::Duration;

/// Where a transmission currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Sending,
    Transmitted,
    Complete,
}

impl Phase {
    /// Suggested time to linger in this phase before the next tick.
    pub fn dwell(self) -> Duration {
        match self {
            Phase::Idle | Phase::Complete => Duration::ZERO,
            Phase::Sending => Duration::from_millis(2500),
            Phase::Transmitted => Duration::from_millis(1000),
        }
    }
}

/// One codeword moving through the channel, one tick at a time.
#[derive(Debug, Clone)]
pub struct Transmission {
    encoded: BitString,
    protected: BTreeSet<usize>,
    phase: Phase,
    outcome: Option<ChannelOutcome>,
}

impl Transmission {
    /// Prepare a transmission. `protected` positions are never corrupted.
    pub fn new(encoded: BitString, protected: BTreeSet<usize>) -> Self {
        Self {
            encoded,
            protected,
            phase: Phase::Idle,
            outcome: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn encoded(&self) -> &BitString {
        &self.encoded
    }

    pub fn protected(&self) -> &BTreeSet<usize> {
        &self.protected
    }

    /// Begin (or repeat) the transmission.
    ///
    /// Returns false, doing nothing, while a transmission is in flight.
    pub fn start(&mut self) -> bool {
        if matches!(self.phase, Phase::Sending | Phase::Transmitted) {
            return false;
        }
        self.phase = Phase::Sending;
        self.outcome = None;
        true
    }

    /// Advance one phase, returning the new phase.
    ///
    /// The channel is used exactly once per transmission, on the tick that
    /// leaves `Sending`. `Idle` and `Complete` are unaffected by ticks.
    pub fn tick(&mut self, channel: &mut NoisyChannel) -> Phase {
        self.phase = match self.phase {
            Phase::Idle => Phase::Idle,
            Phase::Sending => {
                self.outcome = Some(channel.send_protected(&self.encoded, &self.protected));
                Phase::Transmitted
            }
            Phase::Transmitted => Phase::Complete,
            Phase::Complete => Phase::Complete,
        };
        self.phase
    }

    /// What the receiver currently holds: the sent codeword until the
    /// channel has run, then the channel's output.
    pub fn received(&self) -> &BitString {
        self.outcome
            .as_ref()
            .map_or(&self.encoded, |outcome| &outcome.received)
    }

    /// Channel outcome, available from `Transmitted` on.
    pub fn outcome(&self) -> Option<&ChannelOutcome> {
        self.outcome.as_ref()
    }
}
