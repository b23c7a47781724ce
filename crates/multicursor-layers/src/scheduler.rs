//! # Deferred callbacks
//!
//! ## Overview
//!
//! After the Insert and Extend layers exit, Normal is reactivated only after a short delay, so
//! that the editor can finish processing its own mode change first. The delay goes through a
//! [Scheduler] so that hosts can hook it into their own event loop.
//!
//! [TimerQueue] is a scheduler driven by virtual time, for hosts that poll for due callbacks and
//! for tests that want to step through time deterministically.
use std::cell::{Cell, RefCell};
use std::time::Duration;

/// How long to wait before reactivating Normal after another layer exits.
pub const REACTIVATE_DELAY: Duration = Duration::from_millis(20);

/// A callback to run later.
pub type Deferred = Box<dyn FnOnce()>;

/// Runs callbacks after a delay.
pub trait Scheduler {
    /// Run `callback` once `delay` has passed.
    fn after(&self, delay: Duration, callback: Deferred);
}

struct Timer {
    due: Duration,
    seq: u64,
    callback: Deferred,
}

/// A [Scheduler] that runs callbacks as virtual time is advanced.
#[derive(Default)]
pub struct TimerQueue {
    now: Cell<Duration>,
    seq: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
}

impl TimerQueue {
    /// Create a new queue, starting at time zero.
    pub fn new() -> Self {
        TimerQueue::default()
    }

    /// The current virtual time.
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// The number of callbacks waiting to run.
    pub fn pending(&self) -> usize {
        self.timers.borrow().len()
    }

    fn pop_due(&self, until: Duration) -> Option<Timer> {
        let mut timers = self.timers.borrow_mut();

        let idx = timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;

        return Some(timers.remove(idx));
    }

    /// Move time forward by `delta`, running every callback that comes due, in order.
    ///
    /// Callbacks may schedule further callbacks; those also run if they come due before the new
    /// time. Returns the number of callbacks that ran.
    pub fn advance(&self, delta: Duration) -> usize {
        let until = self.now.get() + delta;
        let mut ran = 0;

        while let Some(timer) = self.pop_due(until) {
            self.now.set(timer.due.max(self.now.get()));
            (timer.callback)();
            ran += 1;
        }

        self.now.set(until);

        return ran;
    }
}

impl Scheduler for TimerQueue {
    fn after(&self, delay: Duration, callback: Deferred) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);

        let due = self.now.get() + delay;
        self.timers.borrow_mut().push(Timer { due, seq, callback });
    }
}
