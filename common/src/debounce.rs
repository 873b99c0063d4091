//! [`Debounce`] definitions.

use std::time::{Duration, Instant};

/// Cancellable delayed action, releasing a value only after a quiet period
/// with no newer value being scheduled.
///
/// [`Debounce`] doesn't rely on any timer: the caller reports the current
/// [`Instant`] on each interaction, and polls [`Debounce::fire()`] whenever
/// its own event loop ticks (ideally at [`Debounce::deadline()`]).
#[derive(Clone, Debug)]
pub struct Debounce<T> {
    /// Quiet period to wait before releasing a value.
    period: Duration,

    /// Scheduled value along with the [`Instant`] it becomes due.
    pending: Option<(T, Instant)>,
}

impl<T> Debounce<T> {
    /// Creates a new [`Debounce`] with the provided quiet `period`.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            pending: None,
        }
    }

    /// Schedules the provided `value` to be released after the quiet period
    /// counted from `now`, replacing any value scheduled before.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.period));
    }

    /// Cancels the scheduled value, returning it (if any).
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Returns the [`Instant`] the scheduled value becomes due at (if any).
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    /// Indicates whether there is a scheduled value.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Releases the scheduled value if its quiet period has passed by `now`.
    pub fn fire(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, at)) if *at <= now => self.cancel(),
            Some(_) | None => None,
        }
    }
}
