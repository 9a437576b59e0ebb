// crates/streampeek-core/src/timers.rs
//
// Cancellable one-shot deadlines. No threads, no callbacks: the controller
// polls `fire_due` from its per-frame tick, which keeps everything
// single-threaded and testable with synthetic Instants.

use std::time::{Duration, Instant};

/// One cancellable deadline. Arming always replaces any pending deadline —
/// deadlines never stack.
#[derive(Debug, Default)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// Start (or restart) the deadline `delay` from `now`.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.at = Some(now + delay);
    }

    /// Idempotent — cancelling a deadline that isn't armed is a no-op.
    pub fn cancel(&mut self) {
        self.at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.at.is_some()
    }

    /// When the deadline will fire, if armed. Used by the host to schedule
    /// its next wakeup.
    pub fn at(&self) -> Option<Instant> {
        self.at
    }

    /// True exactly once when `now` has reached the deadline; clears itself
    /// on fire.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.at {
            Some(at) if now >= at => {
                self.at = None;
                true
            }
            _ => false,
        }
    }
}

/// The two named timer slots of the hover state machine. At most one live
/// deadline per slot; a new schedule supersedes the old one.
///
/// The fixed settle/teardown delays are *not* slots here — they are plain
/// `Deadline`s owned by the controller, since nothing else ever touches them.
#[derive(Debug, Default)]
pub struct TimerBank {
    pub hover: Deadline,
    pub hide: Deadline,
}

impl TimerBank {
    /// Cancel any pending hide and arm a new one `delay` from `now`.
    pub fn schedule_hide(&mut self, now: Instant, delay: Duration) {
        self.hide.arm(now, delay);
    }

    /// Cancel any pending hover and arm a new one `delay` from `now`.
    pub fn set_hover(&mut self, now: Instant, delay: Duration) {
        self.hover.arm(now, delay);
    }

    pub fn cancel_hide(&mut self) {
        self.hide.cancel();
    }

    pub fn cancel_hover(&mut self) {
        self.hover.cancel();
    }

    /// Cancels both slots. Used at teardown.
    pub fn clear_all(&mut self) {
        self.cancel_hide();
        self.cancel_hover();
    }
}
