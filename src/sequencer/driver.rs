//! Interrupt-driven step sequencer.
//!
//! Generic over embedded-hal 1.0 delay and the crate's timer, clock,
//! actuator and motion-source seams.

use embedded_hal::delay::DelayNs;

use crate::actuator::StepActuator;
use crate::config::units::Micros;
use crate::config::TimerConfig;
use crate::error::{ActuatorError, Result};
use crate::motion::{Direction, MotionSource};
use crate::timer::{Clock, TimerService};

use super::state::{SequencerState, StartOutcome, StepEvent, StepOutcome};
use super::timing;

/// Per-step hook that does nothing.
pub fn no_hook() {}

/// Schedules steps on a one-shot hardware timer.
///
/// Each timer expiry runs [`on_step`](Self::on_step), which takes one step
/// and re-arms the timer for the next one, subtracting the time the step
/// itself took and the timer's setup latency so the step-to-step spacing
/// matches what the motion source asked for.
///
/// Generic over:
/// - `T`: one-shot timer (a `&mut` borrow of one works too)
/// - `A`: step actuator
/// - `M`: motion source
/// - `C`: free-running microsecond clock
/// - `D`: delay provider, for intervals too short to arm
/// - `H`: per-step hook, run in interrupt context after every step
///
/// Dropping the sequencer disarms the timer and detaches its interrupt.
pub struct StepSequencer<T, A, M, C, D, H = fn()>
where
    T: TimerService,
    A: StepActuator,
    M: MotionSource,
    C: Clock,
    D: DelayNs,
    H: FnMut(),
{
    /// Timer driving the step interrupt.
    pub(super) timer: T,

    /// STEP/DIR outputs and position.
    pub(super) actuator: A,

    /// Source of step intervals.
    pub(super) source: M,

    /// Microsecond clock for step timing.
    pub(super) clock: C,

    /// Busy-wait provider.
    delay: D,

    /// User hook called after every step.
    hook: H,

    /// Hardware limits of `timer`.
    config: TimerConfig,

    /// Sequencer bookkeeping.
    pub(super) state: SequencerState,
}

impl<T, A, M, C, D, H> StepSequencer<T, A, M, C, D, H>
where
    T: TimerService,
    A: StepActuator,
    M: MotionSource,
    C: Clock,
    D: DelayNs,
    H: FnMut(),
{
    /// Create a stopped sequencer.
    ///
    /// `config` must describe `timer`. The interrupt is not attached; see
    /// [`attach_interrupt`](Self::attach_interrupt).
    pub fn new(timer: T, actuator: A, source: M, clock: C, delay: D, hook: H, config: TimerConfig) -> Self {
        let mut state = SequencerState::default();
        if let Some(direction) = source.direction() {
            state.direction = direction;
        }

        Self {
            timer,
            actuator,
            source,
            clock,
            delay,
            hook,
            config,
            state,
        }
    }

    /// Timer expiry handler: take one step and schedule the next.
    ///
    /// Runs in interrupt context. On a pin failure the timer is disarmed
    /// before the error is returned, so a fault always stops motion.
    pub fn on_step(&mut self) -> Result<StepOutcome> {
        let start_time = self.clock.now();
        self.state.is_armed = false;
        self.state.last_start_time = Some(start_time);

        if let Err(e) = self.pulse() {
            self.timer.disarm();
            trace!("step fault: {}", e);
            return Err(e.into());
        }

        (self.hook)();
        let requested_interval = self.source.next_interval(self.actuator.position());
        if let Some(direction) = self.source.direction() {
            self.state.direction = direction;
        }

        if requested_interval.is_zero() {
            self.timer.disarm();
            trace!("motion finished at {}", self.actuator.position());
            return Ok(StepOutcome::Finished);
        }

        let step_duration =
            timing::step_duration(start_time, self.clock.now(), self.config.measurement_overhead);
        let corrected_period = timing::reload_period(requested_interval, step_duration, &self.config);
        self.arm(corrected_period);

        let event = StepEvent {
            start_time,
            step_duration,
            requested_interval,
            corrected_period,
        };
        if event.was_clamped(self.config.setup_latency) {
            trace!("period clamped: {}", event);
        } else {
            trace!("step: {}", event);
        }

        Ok(StepOutcome::Scheduled(event))
    }

    /// Schedule the first step `interval` from now.
    ///
    /// Any pending countdown is cancelled first. A zero interval steps
    /// immediately; an interval the timer cannot resolve
    /// (`<= setup_latency + min_reliable_period`) is busy-waited and then
    /// stepped in place. Call from foreground context only.
    pub fn start(&mut self, interval: Micros) -> Result<StartOutcome> {
        if let Some(direction) = self.source.direction() {
            self.state.direction = direction;
        }
        self.disarm();

        if interval.is_zero() {
            debug!("start: stepping now");
            return self.step_in_place();
        }

        if interval <= self.config.busy_wait_threshold() {
            debug!("start: busy-waiting {} us", interval);
            self.delay.delay_us(interval.value());
            return self.step_in_place();
        }

        let period = timing::start_period(interval, &self.config);
        debug!("start: arming {} us", period);
        self.arm(period);
        Ok(StartOutcome::Armed(period))
    }

    /// Cancel any pending step. Idempotent.
    pub fn stop(&mut self) {
        self.disarm();
        debug!("stop at {}", self.actuator.position());
    }

    /// Register the timer's expiry handler.
    ///
    /// `isr` must reach this sequencer and call [`on_step`](Self::on_step).
    pub fn attach_interrupt(&mut self, isr: fn()) {
        self.timer.attach(isr);
    }

    /// Remove the timer's expiry handler.
    pub fn detach_interrupt(&mut self) {
        self.timer.detach();
    }

    /// Direction of the next step.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    /// Set the direction of the next step.
    ///
    /// Sources that decide direction themselves override this on every step.
    pub fn set_direction(&mut self, direction: Direction) {
        self.state.direction = direction;
    }

    /// Current position in steps.
    #[inline]
    pub fn position(&self) -> i64 {
        self.actuator.position()
    }

    /// Whether a step is pending on the timer.
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.state.is_armed
    }

    /// Sequencer bookkeeping.
    #[inline]
    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    /// Timer limits in use.
    #[inline]
    pub fn timer_config(&self) -> &TimerConfig {
        &self.config
    }

    /// The motion source.
    #[inline]
    pub fn source(&self) -> &M {
        &self.source
    }

    /// The step actuator.
    #[inline]
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// The timer.
    #[inline]
    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub(super) fn disarm(&mut self) {
        self.timer.disarm();
        self.state.is_armed = false;
    }

    fn arm(&mut self, period: Micros) {
        self.timer.arm(period);
        self.state.is_armed = true;
    }

    fn step_in_place(&mut self) -> Result<StartOutcome> {
        self.on_step().map(StartOutcome::Stepped).map_err(|e| {
            warn!("step failed, motion stopped");
            e
        })
    }

    /// Rising edge, position update, falling edge.
    fn pulse(&mut self) -> core::result::Result<(), ActuatorError> {
        let direction = self.state.direction;
        self.actuator.set_direction(direction)?;
        self.actuator.toggle_step()?;
        self.actuator.advance_position(direction.sign());
        self.actuator.toggle_step()
    }
}

impl<T, A, M, C, D, H> Drop for StepSequencer<T, A, M, C, D, H>
where
    T: TimerService,
    A: StepActuator,
    M: MotionSource,
    C: Clock,
    D: DelayNs,
    H: FnMut(),
{
    fn drop(&mut self) {
        self.timer.disarm();
        self.timer.detach();
    }
}
