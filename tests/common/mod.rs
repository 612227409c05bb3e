//! Shared fakes for driving a [`tactix::GameSession`] without a console
#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use tactix::{
    ports::{Clock, InputSource, Renderer, Sleeper},
    Board, Error, Result, SessionEvent,
};

/// Captures every announced event for later assertions
pub struct RecordingRenderer {
    pub events: Vec<SessionEvent>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        RecordingRenderer { events: Vec::new() }
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, _board: &Board) {}

    fn announce(&mut self, event: &SessionEvent) {
        self.events.push(*event);
    }
}

/// Hand-cranked clock shared between the session and the test body
#[derive(Clone)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            now: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Plays back a fixed sequence of entries; reading past the end is an I/O
/// error, matching a closed stdin. Each read can optionally cost simulated
/// time on a [`ManualClock`].
pub struct ScriptedInput {
    entries: VecDeque<Result<usize>>,
    clock: Option<ManualClock>,
    read_cost: Duration,
}

impl ScriptedInput {
    pub fn new(entries: impl IntoIterator<Item = Result<usize>>) -> Self {
        ScriptedInput {
            entries: entries.into_iter().collect(),
            clock: None,
            read_cost: Duration::ZERO,
        }
    }

    /// Make every read advance `clock` by `read_cost`, simulating a human
    /// who takes that long to type an entry
    pub fn with_read_cost(mut self, clock: ManualClock, read_cost: Duration) -> Self {
        self.clock = Some(clock);
        self.read_cost = read_cost;
        self
    }

    pub fn push(&mut self, entry: Result<usize>) {
        self.entries.push_back(entry);
    }
}

impl InputSource for ScriptedInput {
    fn read_move(&mut self) -> Result<usize> {
        if let Some(clock) = &self.clock {
            clock.advance(self.read_cost);
        }
        self.entries.pop_front().unwrap_or_else(|| {
            Err(Error::Io {
                operation: "read scripted move".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "script exhausted"),
            })
        })
    }
}

/// An entry that fails to parse, like typing "banana" at the prompt
pub fn bad_entry() -> Result<usize> {
    Err(Error::InvalidInput {
        input: "banana".to_string(),
    })
}

/// Sleeper that returns immediately
pub struct NoSleep;

impl Sleeper for NoSleep {
    fn sleep(&mut self, _duration: Duration) {}
}

/// Sleeper that advances a [`ManualClock`] instead of blocking
pub struct ClockSleeper(pub ManualClock);

impl Sleeper for ClockSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.0.advance(duration);
    }
}
