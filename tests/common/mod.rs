//! Recording test doubles shared by the integration tests.
//!
//! Every double appends to one shared [`Log`], so tests can assert on the
//! relative order of timer, pin, delay and ramp calls.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use interrupt_stepper::config::units::{Micros, Timestamp};
use interrupt_stepper::error::ActuatorError;
use interrupt_stepper::motion::{AccelRamp, Direction, MotionSource, RampSource};
use interrupt_stepper::{Clock, SequencerBuilder, StepActuator, StepSequencer, TimerConfig, TimerService};

/// One observable side effect.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Arm(u32),
    Disarm,
    Attach,
    Detach,
    Dir(Direction),
    Toggle,
    Delay(u32),
    SetTarget(i64),
    SetMaxSpeed(f32),
    SetAcceleration(f32),
    Recompute,
}

/// Shared, ordered call log.
#[derive(Debug, Clone, Default)]
pub struct Log(Rc<RefCell<Vec<Call>>>);

impl Log {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn arms(&self) -> Vec<u32> {
        self.0
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Arm(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn position_of(&self, call: &Call) -> Option<usize> {
        self.0.borrow().iter().position(|c| c == call)
    }

    pub fn count(&self, call: &Call) -> usize {
        self.0.borrow().iter().filter(|c| *c == call).count()
    }
}

/// Timer that records every call.
pub struct LogTimer {
    log: Log,
}

impl LogTimer {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl TimerService for LogTimer {
    fn arm(&mut self, period: Micros) {
        self.log.push(Call::Arm(period.value()));
    }

    fn disarm(&mut self) {
        self.log.push(Call::Disarm);
    }

    fn attach(&mut self, _callback: fn()) {
        self.log.push(Call::Attach);
    }

    fn detach(&mut self) {
        self.log.push(Call::Detach);
    }
}

/// Actuator that records edges and direction writes.
pub struct LogActuator {
    log: Log,
    position: i64,
}

impl LogActuator {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            position: 0,
        }
    }
}

impl StepActuator for LogActuator {
    fn set_direction(&mut self, direction: Direction) -> Result<(), ActuatorError> {
        self.log.push(Call::Dir(direction));
        Ok(())
    }

    fn toggle_step(&mut self) -> Result<(), ActuatorError> {
        self.log.push(Call::Toggle);
        Ok(())
    }

    fn advance_position(&mut self, delta: i64) {
        self.position = self.position.saturating_add(delta);
    }

    fn position(&self) -> i64 {
        self.position
    }

    fn set_position(&mut self, steps: i64) {
        self.position = steps;
    }
}

/// Clock that replays scripted readings, then repeats the last one.
pub struct ScriptedClock {
    readings: RefCell<VecDeque<u32>>,
    last: RefCell<u32>,
}

impl ScriptedClock {
    pub fn new(readings: &[u32]) -> Self {
        Self {
            readings: RefCell::new(readings.iter().copied().collect()),
            last: RefCell::new(0),
        }
    }

    /// A clock stuck at `reading`.
    pub fn fixed(reading: u32) -> Self {
        Self::new(&[reading])
    }

    /// Queue more readings.
    pub fn push(&self, readings: &[u32]) {
        self.readings.borrow_mut().extend(readings.iter().copied());
    }
}

impl Clock for ScriptedClock {
    fn now(&self) -> Timestamp {
        if let Some(next) = self.readings.borrow_mut().pop_front() {
            *self.last.borrow_mut() = next;
        }
        Timestamp(*self.last.borrow())
    }
}

/// Delay that records the requested wait instead of sleeping.
pub struct RecordingDelay {
    log: Log,
}

impl RecordingDelay {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.push(Call::Delay(ns / 1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.push(Call::Delay(us));
    }
}

/// AccelRamp wrapper that records parameter writes.
pub struct RecordingRamp {
    inner: AccelRamp,
    log: Log,
}

impl RecordingRamp {
    pub fn new(log: &Log, inner: AccelRamp) -> Self {
        Self {
            inner,
            log: log.clone(),
        }
    }
}

impl MotionSource for RecordingRamp {
    fn next_interval(&mut self, position: i64) -> Micros {
        self.inner.next_interval(position)
    }

    fn direction(&self) -> Option<Direction> {
        MotionSource::direction(&self.inner)
    }
}

impl RampSource for RecordingRamp {
    fn recompute(&mut self, position: i64) -> Micros {
        self.log.push(Call::Recompute);
        self.inner.recompute(position)
    }

    fn target(&self) -> i64 {
        self.inner.target()
    }

    fn set_target(&mut self, target: i64) {
        self.log.push(Call::SetTarget(target));
        self.inner.set_target(target);
    }

    fn max_speed(&self) -> f32 {
        self.inner.max_speed()
    }

    fn set_max_speed(&mut self, speed: f32) {
        self.log.push(Call::SetMaxSpeed(speed));
        self.inner.set_max_speed(speed);
    }

    fn acceleration(&self) -> f32 {
        self.inner.acceleration()
    }

    fn set_acceleration(&mut self, acceleration: f32) {
        self.log.push(Call::SetAcceleration(acceleration));
        self.inner.set_acceleration(acceleration);
    }

    fn speed(&self) -> f32 {
        self.inner.speed()
    }
}

pub type TestSequencer<M> = StepSequencer<LogTimer, LogActuator, M, ScriptedClock, RecordingDelay>;

/// Sequencer over the recording doubles with the SAM3X timer limits.
pub fn sequencer<M: MotionSource>(log: &Log, source: M, clock: ScriptedClock) -> TestSequencer<M> {
    SequencerBuilder::new()
        .timer(LogTimer::new(log))
        .actuator(LogActuator::new(log))
        .source(source)
        .clock(clock)
        .delay(RecordingDelay::new(log))
        .timer_config(TimerConfig::SAM3X_TC)
        .build()
        .expect("all components supplied")
}
