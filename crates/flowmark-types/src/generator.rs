//! Sources of fresh state identifiers.
//!
//! [`ClockIdGenerator`] derives short ids from the wall-clock minute of the
//! day plus a rolling counter, so generated ids stay far below
//! [`CHECKBOX_TOKEN_OFFSET`](crate::CHECKBOX_TOKEN_OFFSET) and encode to three
//! or four base-36 characters. Uniqueness is only meaningful within one
//! session; callers check candidates against the ids they already hold.

use chrono::Timelike;

use crate::id::StateId;

/// Minutes in a day; minute-of-day values are clamped below this.
const MINUTES_PER_DAY: u32 = 24 * 60;

/// Width of the rolling counter appended to the minute of the day.
const COUNTER_SPAN: u32 = 100;

/// A source of candidate state identifiers.
pub trait IdSource {
    /// Produce the next candidate id. Candidates are non-negative; callers
    /// negate them for checkbox-branch states.
    fn next_id(&mut self) -> StateId;
}

/// Time-derived id generator: `minute_of_day * 100 + counter`.
#[derive(Debug, Default)]
pub struct ClockIdGenerator {
    counter: u32,
}

impl ClockIdGenerator {
    /// Create a generator with its counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce an id for an explicit minute of the day.
    ///
    /// The counter is advanced before use and wraps every 100 ids.
    pub fn next_at(&mut self, minute_of_day: u32) -> StateId {
        self.counter = (self.counter + 1) % COUNTER_SPAN;
        let minute = minute_of_day.min(MINUTES_PER_DAY - 1);
        StateId::new(i64::from(minute * COUNTER_SPAN + self.counter))
    }
}

impl IdSource for ClockIdGenerator {
    fn next_id(&mut self) -> StateId {
        let now = chrono::Local::now();
        self.next_at(now.hour() * 60 + now.minute())
    }
}

/// Deterministic id source counting upward from a starting value.
///
/// Useful for hosts that need reproducible ids (scripts, fixtures, tests).
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: i64,
}

impl SequentialIds {
    /// Start counting at `first`.
    pub fn starting_at(first: i64) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> StateId {
        let id = StateId::new(self.next);
        self.next += 1;
        id
    }
}
