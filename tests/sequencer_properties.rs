//! Property tests for reload-period arithmetic.

use proptest::prelude::*;

use interrupt_stepper::config::units::{Micros, Timestamp};
use interrupt_stepper::sequencer::timing::{reload_period, start_period, step_duration};
use interrupt_stepper::TimerConfig;

const SAM3X: TimerConfig = TimerConfig::SAM3X_TC;

proptest! {
    #[test]
    fn reload_is_always_schedulable(next in any::<u32>(), duration in any::<u32>()) {
        let period = reload_period(Micros(next), Micros(duration), &SAM3X);
        prop_assert!(SAM3X.is_schedulable(period));
    }

    #[test]
    fn reload_is_exact_when_in_range(duration in 0u32..10_000, slack in 5u32..1_000_000) {
        // next - duration - setup lands on `slack`, inside [min, max)
        let next = slack + duration + 8;
        let period = reload_period(Micros(next), Micros(duration), &SAM3X);
        prop_assert_eq!(period, Micros(slack));
    }

    #[test]
    fn reload_below_min_or_underflowed_is_min(duration in 0u32..10_000, short in 0u32..13) {
        // Anything at or below duration + setup + 4 falls short of the minimum
        let next = duration.saturating_add(short);
        let period = reload_period(Micros(next), Micros(duration), &SAM3X);
        prop_assert_eq!(period, Micros(5));
    }

    #[test]
    fn clamp_is_idempotent(raw in any::<u32>()) {
        let once = SAM3X.clamp(Micros(raw));
        prop_assert_eq!(SAM3X.clamp(once), once);
    }

    #[test]
    fn step_duration_survives_wraparound(start in any::<u32>(), window in 2u32..1_000_000) {
        let end = start.wrapping_add(window);
        let duration = step_duration(Timestamp(start), Timestamp(end), Micros(2));
        prop_assert_eq!(duration, Micros(window - 2));
    }

    #[test]
    fn start_period_subtracts_setup_latency(interval in 14u32..u32::MAX) {
        let period = start_period(Micros(interval), &SAM3X);
        let raw = interval - 8;
        let expected = if raw < 102_261_126 { raw } else { 5 };
        prop_assert_eq!(period, Micros(expected));
    }
}
