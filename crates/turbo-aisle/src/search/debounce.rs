//! Last-write-wins debouncing for search input.

use std::time::{Duration, Instant};

/// Quiescence window after the last keystroke before a recompute runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(120);

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    due: Instant,
}

/// Delays a value until no newer one has arrived for a fixed window.
///
/// Scheduling while a value is pending replaces it and restarts the
/// window; a superseded value is dropped and never fires. The caller
/// supplies the clock, so the debouncer works under any event loop and
/// deterministically in tests.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `value` to fire one window after `now`.
    ///
    /// Returns true if this superseded a pending value.
    pub fn schedule(&mut self, value: T, now: Instant) -> bool {
        let superseded = self.pending.is_some();
        if superseded {
            tracing::trace!("pending recompute superseded");
        }
        self.pending = Some(Pending {
            value,
            due: now + self.window,
        });
        superseded
    }

    /// Take the pending value if its window has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = self.pending.as_ref().is_some_and(|p| now >= p.due);
        if !ready {
            return None;
        }
        self.pending.take().map(|p| p.value)
    }

    /// Drop the pending value without firing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will become ready, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
