//! The interrupt step sequencer.
//!
//! [`StepSequencer`] turns a stream of ideal step intervals into hardware
//! timer reloads. The step handler measures how long its own step took and
//! shortens the next countdown by that amount plus the timer's setup
//! latency; reloads the timer cannot honour are clamped to its minimum
//! reliable period.
//!
//! # Interrupt and foreground contexts
//!
//! [`StepSequencer::on_step`] runs in interrupt context. Everything else is
//! foreground API. Foreground calls that change what the handler sees
//! disarm the timer first, which is all the mutual exclusion this needs on
//! a single core:
//!
//! ```ignore
//! static AXIS: Mutex<RefCell<Option<Axis>>> = Mutex::new(RefCell::new(None));
//!
//! fn on_timer() {
//!     critical_section::with(|cs| {
//!         if let Some(axis) = AXIS.borrow_ref_mut(cs).as_mut() {
//!             let _ = axis.on_step();
//!         }
//!     });
//! }
//! ```

mod builder;
mod driver;
mod ramp;
mod state;
pub mod timing;

pub use builder::SequencerBuilder;
pub use driver::{no_hook, StepSequencer};
pub use state::{SequencerState, StartOutcome, StepEvent, StepOutcome};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::CallbackActuator;
    use crate::config::units::{Micros, Timestamp};
    use crate::config::TimerConfig;
    use crate::error::{Error, SequencerError};
    use crate::timer::TimerService;
    use embedded_hal_mock::eh1::delay::NoopDelay;

    #[derive(Default)]
    struct LastArm(Option<Micros>);

    impl TimerService for LastArm {
        fn arm(&mut self, period: Micros) {
            self.0 = Some(period);
        }

        fn disarm(&mut self) {
            self.0 = None;
        }

        fn attach(&mut self, _callback: fn()) {}

        fn detach(&mut self) {}
    }

    fn noop() {}

    #[test]
    fn test_builder_reports_missing_timer() {
        let result = SequencerBuilder::<LastArm, _, _, _, _>::new()
            .actuator(CallbackActuator::new(noop, noop))
            .source(|_: i64| Micros(100))
            .clock(|| Timestamp(0))
            .delay(NoopDelay::new())
            .timer_config(TimerConfig::SAM3X_TC)
            .build();

        assert!(matches!(
            result,
            Err(Error::Sequencer(SequencerError::MissingComponent("timer")))
        ));
    }

    #[test]
    fn test_start_arms_for_long_interval() {
        let mut sequencer = SequencerBuilder::new()
            .timer(LastArm::default())
            .actuator(CallbackActuator::new(noop, noop))
            .source(|_: i64| Micros(100))
            .clock(|| Timestamp(0))
            .delay(NoopDelay::new())
            .timer_config(TimerConfig::SAM3X_TC)
            .build()
            .unwrap();

        let outcome = sequencer.start(Micros(1_000)).unwrap();
        assert_eq!(outcome, StartOutcome::Armed(Micros(992)));
        assert!(sequencer.is_armed());
        assert_eq!(sequencer.position(), 0);

        sequencer.stop();
        assert!(!sequencer.is_armed());
        assert_eq!(sequencer.timer().0, None);
    }

    #[test]
    fn test_hook_runs_once_per_step() {
        use core::cell::Cell;

        let calls = Cell::new(0);
        let mut sequencer = SequencerBuilder::new()
            .timer(LastArm::default())
            .actuator(CallbackActuator::new(noop, noop))
            .source(|_: i64| Micros(500))
            .clock(|| Timestamp(0))
            .delay(NoopDelay::new())
            .timer_config(TimerConfig::SAM3X_TC)
            .on_step(|| calls.set(calls.get() + 1))
            .build()
            .unwrap();

        sequencer.on_step().unwrap();
        sequencer.on_step().unwrap();

        assert_eq!(calls.get(), 2);
        assert_eq!(sequencer.position(), 2);
    }
}
