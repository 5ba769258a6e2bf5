//! Sequencer bookkeeping and per-step records.

use crate::config::units::{Micros, Timestamp};
use crate::motion::Direction;

/// Persistent state of one sequencer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequencerState {
    /// Clock reading at the start of the most recent step, `None` before the first.
    pub last_start_time: Option<Timestamp>,

    /// Direction the next step is taken in.
    pub direction: Direction,

    /// Whether a countdown was armed and has not fired or been cancelled.
    pub is_armed: bool,
}

impl SequencerState {
    /// Time since the last step started.
    ///
    /// Before the first step this saturates to `u32::MAX`, so anything
    /// waiting on it is due immediately.
    pub fn elapsed_since_step(&self, now: Timestamp) -> Micros {
        match self.last_start_time {
            Some(start) => now.elapsed_since(start),
            None => Micros(u32::MAX),
        }
    }
}

/// Timing record of a single scheduled step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepEvent {
    /// Clock reading when the handler started.
    pub start_time: Timestamp,

    /// Measured step window, net of the clock-read overhead.
    pub step_duration: Micros,

    /// Interval the motion source asked for.
    pub requested_interval: Micros,

    /// Period actually loaded into the timer.
    pub corrected_period: Micros,
}

impl StepEvent {
    /// Whether the clamp replaced the computed period.
    pub fn was_clamped(&self, setup_latency: Micros) -> bool {
        self.requested_interval
            .wrapping_sub(self.step_duration)
            .wrapping_sub(setup_latency)
            != self.corrected_period
    }
}

/// Result of one step handler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepOutcome {
    /// A step was taken and the next one is armed.
    Scheduled(StepEvent),
    /// A step was taken and the motion source asked to stop.
    Finished,
}

/// Result of [`StepSequencer::start`](super::StepSequencer::start).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartOutcome {
    /// The timer was armed with this period.
    Armed(Micros),
    /// The interval was too short to arm, so the step was taken in place.
    Stepped(StepOutcome),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_before_first_step() {
        let state = SequencerState::default();
        assert_eq!(state.elapsed_since_step(Timestamp(10)), Micros(u32::MAX));
    }

    #[test]
    fn test_clamp_detection() {
        let event = StepEvent {
            start_time: Timestamp(0),
            step_duration: Micros(50),
            requested_interval: Micros(10),
            corrected_period: Micros(5),
        };
        assert!(event.was_clamped(Micros(8)));

        let event = StepEvent {
            requested_interval: Micros(1000),
            corrected_period: Micros(942),
            ..event
        };
        assert!(!event.was_clamped(Micros(8)));
    }
}
