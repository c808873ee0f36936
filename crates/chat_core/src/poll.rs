use std::fmt;
use std::time::Duration;

use crate::{Cursor, Message, MessageId};

/// Exponential backoff between failed polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    floor: Duration,
    cap: Duration,
    current: Duration,
}

impl Backoff {
    pub fn new(floor: Duration, cap: Duration) -> Self {
        let floor = floor.min(cap);
        Self {
            floor,
            cap,
            current: floor,
        }
    }

    pub fn current(&self) -> Duration {
        self.current
    }

    pub fn floor(&self) -> Duration {
        self.floor
    }

    /// Doubles the delay, clamped to the cap, and returns the new value.
    pub fn fail(&mut self) -> Duration {
        self.current = self.current.saturating_mul(2).min(self.cap);
        self.current
    }

    pub fn reset(&mut self) {
        self.current = self.floor;
    }
}

/// What a successful request cycle brought back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollReply {
    /// Status "ok". `cursor` is the envelope value, superseded by the last message id.
    Batch {
        messages: Vec<Message>,
        cursor: Option<MessageId>,
    },
    /// Status "try again": the server held the request and had nothing new.
    TryAgain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// The request never produced a response body.
    Transport,
    /// The body could not be parsed or carried an unknown status.
    Protocol,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollFailure {
    pub class: FailureClass,
    pub detail: String,
}

impl PollFailure {
    pub fn transport(detail: impl Into<String>) -> Self {
        Self {
            class: FailureClass::Transport,
            detail: detail.into(),
        }
    }

    pub fn protocol(detail: impl Into<String>) -> Self {
        Self {
            class: FailureClass::Protocol,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for PollFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class {
            FailureClass::Transport => write!(f, "transport failure: {}", self.detail),
            FailureClass::Protocol => write!(f, "protocol failure: {}", self.detail),
        }
    }
}

/// Request/backoff cycle bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    pub(crate) cursor: Cursor,
    pub(crate) backoff: Backoff,
    pub(crate) in_flight: bool,
    /// Number of requests issued so far; identifies the current cycle.
    pub(crate) cycle: u64,
    pub(crate) waiting: bool,
}

impl PollState {
    pub fn new(backoff: Backoff) -> Self {
        Self {
            cursor: Cursor::new(),
            backoff,
            in_flight: false,
            cycle: 0,
            waiting: false,
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn backoff(&self) -> Duration {
        self.backoff.current()
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Marks a new request as in flight and returns its cycle number.
    pub(crate) fn begin_cycle(&mut self) -> u64 {
        self.in_flight = true;
        self.waiting = false;
        self.cycle += 1;
        self.cycle
    }

    pub(crate) fn end_cycle(&mut self) {
        self.in_flight = false;
        self.waiting = false;
    }
}

/// Text for the transient notice shown after a failed cycle.
pub fn retry_notice(delay: Duration) -> String {
    let millis = delay.as_millis();
    if millis % 1000 == 0 {
        format!("network error; try again in {}s", millis / 1000)
    } else {
        format!("network error; try again in {}s", delay.as_secs_f64())
    }
}
