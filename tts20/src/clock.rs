//! Time source used for protocol deadlines.
//!
//! The driver never sleeps; every wait is a poll loop that checks a
//! [`Clock`] between bus transactions. Any monotonic millisecond counter
//! works, including a plain closure:
//!
//! ```
//! use tts20::Clock;
//!
//! let mut ticks = 0u32;
//! let mut clock = move || {
//!     ticks += 1;
//!     ticks
//! };
//! assert_eq!(clock.now_ms(), 1);
//! ```

/// Monotonic millisecond time provider. Implement this for your platform.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch.
    ///
    /// The counter may wrap at `u32::MAX`; elapsed time is computed with
    /// wrapping subtraction.
    fn now_ms(&mut self) -> u32;
}

impl<F> Clock for F
where
    F: FnMut() -> u32,
{
    fn now_ms(&mut self) -> u32 {
        self()
    }
}

/// A point in time plus a timeout, checked against a [`Clock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Deadline {
    start: u32,
    timeout_ms: u32,
}

impl Deadline {
    /// Start a deadline `timeout_ms` from now.
    pub(crate) fn start<C: Clock>(clock: &mut C, timeout_ms: u32) -> Self {
        Self {
            start: clock.now_ms(),
            timeout_ms,
        }
    }

    /// Start a deadline only when a timeout is configured.
    ///
    /// `None` means the wait is unbounded.
    pub(crate) fn optional<C: Clock>(clock: &mut C, timeout_ms: Option<u32>) -> Option<Self> {
        timeout_ms.map(|ms| Self::start(clock, ms))
    }

    /// True once at least `timeout_ms` have passed since [`start`](Self::start).
    pub(crate) fn expired<C: Clock>(&self, clock: &mut C) -> bool {
        clock.now_ms().wrapping_sub(self.start) >= self.timeout_ms
    }
}
