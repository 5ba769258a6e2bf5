//! Hardware timer and clock seams.
//!
//! The sequencer never talks to a peripheral directly. A target crate
//! implements [`TimerService`] for its one-shot timer channel and [`Clock`]
//! for its free-running microsecond counter.
//!
//! # Interrupt wiring
//!
//! [`TimerService::attach`] registers a plain `fn()` as the expiry handler.
//! That handler typically borrows a sequencer stored in a
//! `critical_section::Mutex<RefCell<Option<..>>>` static and calls
//! [`StepSequencer::on_step`](crate::StepSequencer::on_step) on it.

#[cfg(feature = "std")]
mod clock;

#[cfg(feature = "std")]
pub use clock::SystemClock;

use crate::config::units::{Micros, Timestamp};

/// A one-shot countdown timer that invokes an attached callback on expiry.
///
/// Implementations must fire the callback exactly once per `arm` unless
/// `disarm` is called first. Arming while a countdown is pending replaces it.
pub trait TimerService {
    /// Start a countdown of `period`.
    ///
    /// The caller guarantees `period` lies within the timer's reliable range
    /// (see [`TimerConfig`](crate::config::TimerConfig)).
    fn arm(&mut self, period: Micros);

    /// Cancel any pending countdown. Idempotent.
    fn disarm(&mut self);

    /// Register the expiry handler.
    fn attach(&mut self, callback: fn());

    /// Remove the expiry handler.
    fn detach(&mut self);
}

impl<T: TimerService + ?Sized> TimerService for &mut T {
    fn arm(&mut self, period: Micros) {
        (**self).arm(period)
    }

    fn disarm(&mut self) {
        (**self).disarm()
    }

    fn attach(&mut self, callback: fn()) {
        (**self).attach(callback)
    }

    fn detach(&mut self) {
        (**self).detach()
    }
}

/// Free-running monotonic microsecond clock.
///
/// The counter is 32 bits wide and wraps; consumers compare readings with
/// [`Timestamp::elapsed_since`].
pub trait Clock {
    /// Current counter value.
    fn now(&self) -> Timestamp;
}

impl<F> Clock for F
where
    F: Fn() -> Timestamp,
{
    fn now(&self) -> Timestamp {
        self()
    }
}
