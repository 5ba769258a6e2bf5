//! Reload-period arithmetic.
//!
//! All subtraction here is wrapping on 32 bits. An underflow lands at or
//! above `max_period` and is caught by the clamp.

use crate::config::units::{Micros, Timestamp};
use crate::config::TimerConfig;

/// Time spent inside the step window, net of the clock-read overhead.
#[inline]
pub fn step_duration(start: Timestamp, now: Timestamp, overhead: Micros) -> Micros {
    now.elapsed_since(start).wrapping_sub(overhead)
}

/// Period to load into the timer so the next step lands `next_interval`
/// after the start of the current one.
#[inline]
pub fn reload_period(next_interval: Micros, step_duration: Micros, config: &TimerConfig) -> Micros {
    let raw = next_interval
        .wrapping_sub(step_duration)
        .wrapping_sub(config.setup_latency);
    config.clamp(raw)
}

/// Period to load into the timer for a step `interval` from now.
#[inline]
pub fn start_period(interval: Micros, config: &TimerConfig) -> Micros {
    config.clamp(interval.wrapping_sub(config.setup_latency))
}
