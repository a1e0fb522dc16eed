use std::cell::Cell;
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Wall-clock source for capture timestamps and sampling gates.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Local>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        ManualClock {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + to_time_delta(by));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Local::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Local> {
        (**self).now()
    }
}

/// Gates census captures on a "next allowed capture time".
///
/// Captures are not queued: a pass that arrives late captures once and
/// pushes the gate a full interval past that moment. An interval reaching
/// past the last representable time closes the gate for good.
#[derive(Debug, Clone)]
pub struct Sampler {
    interval: TimeDelta,
    next_capture: Option<DateTime<Local>>,
}

impl Sampler {
    /// `last_capture` is the moment of the capture that seeds the history.
    pub fn new(interval: Duration, last_capture: DateTime<Local>) -> Self {
        let interval = to_time_delta(interval);
        Sampler {
            interval,
            next_capture: gate_after(last_capture, interval),
        }
    }

    pub fn is_due(&self, now: DateTime<Local>) -> bool {
        self.next_capture.is_some_and(|gate| now > gate)
    }

    pub fn mark_captured(&mut self, now: DateTime<Local>) {
        self.next_capture = gate_after(now, self.interval);
    }

    pub fn next_capture(&self) -> Option<DateTime<Local>> {
        self.next_capture
    }

    pub fn interval(&self) -> Duration {
        self.interval.to_std().unwrap_or(DEFAULT_INTERVAL)
    }
}

fn gate_after(moment: DateTime<Local>, interval: TimeDelta) -> Option<DateTime<Local>> {
    moment.checked_add_signed(interval)
}

fn to_time_delta(duration: Duration) -> TimeDelta {
    TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX)
}
