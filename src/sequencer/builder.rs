//! Builder pattern for StepSequencer.

use embedded_hal::delay::DelayNs;

use crate::actuator::StepActuator;
use crate::config::{SystemConfig, TimerConfig};
use crate::error::{ConfigError, Error, Result, SequencerError};
use crate::motion::MotionSource;
use crate::timer::{Clock, TimerService};

use super::driver::{no_hook, StepSequencer};

/// Builder for creating StepSequencer instances.
pub struct SequencerBuilder<T, A, M, C, D, H = fn()> {
    timer: Option<T>,
    actuator: Option<A>,
    source: Option<M>,
    clock: Option<C>,
    delay: Option<D>,
    hook: H,
    timer_config: Option<TimerConfig>,
}

impl<T, A, M, C, D> Default for SequencerBuilder<T, A, M, C, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A, M, C, D> SequencerBuilder<T, A, M, C, D> {
    /// Create a new builder with no per-step hook.
    pub fn new() -> Self {
        Self {
            timer: None,
            actuator: None,
            source: None,
            clock: None,
            delay: None,
            hook: no_hook,
            timer_config: None,
        }
    }
}

impl<T, A, M, C, D, H> SequencerBuilder<T, A, M, C, D, H> {
    /// Set the hardware timer.
    pub fn timer(mut self, timer: T) -> Self {
        self.timer = Some(timer);
        self
    }

    /// Set the step actuator.
    pub fn actuator(mut self, actuator: A) -> Self {
        self.actuator = Some(actuator);
        self
    }

    /// Set the motion source.
    pub fn source(mut self, source: M) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the microsecond clock.
    pub fn clock(mut self, clock: C) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the timer limits.
    pub fn timer_config(mut self, config: TimerConfig) -> Self {
        self.timer_config = Some(config);
        self
    }

    /// Set the per-step hook.
    ///
    /// Runs in interrupt context after every step: it must not block,
    /// allocate, or touch the timer.
    pub fn on_step<H2: FnMut()>(self, hook: H2) -> SequencerBuilder<T, A, M, C, D, H2> {
        SequencerBuilder {
            timer: self.timer,
            actuator: self.actuator,
            source: self.source,
            clock: self.clock,
            delay: self.delay,
            hook,
            timer_config: self.timer_config,
        }
    }

    /// Configure the timer limits from SystemConfig by axis name.
    pub fn from_config(mut self, config: &SystemConfig, axis_name: &str) -> Result<Self> {
        let axis = config.axis(axis_name).ok_or_else(|| {
            Error::Config(ConfigError::AxisNotFound(
                heapless::String::try_from(axis_name).unwrap_or_default(),
            ))
        })?;

        let timer_config = config
            .timer(axis.timer.as_str())
            .ok_or_else(|| Error::Config(ConfigError::TimerNotFound(axis.timer.clone())))?;

        self.timer_config = Some(*timer_config);
        Ok(self)
    }
}

impl<T, A, M, C, D, H> SequencerBuilder<T, A, M, C, D, H>
where
    T: TimerService,
    A: StepActuator,
    M: MotionSource,
    C: Clock,
    D: DelayNs,
    H: FnMut(),
{
    /// Build the StepSequencer.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::MissingComponent`] naming the first
    /// collaborator that was not supplied, or a configuration error if the
    /// timer limits are inconsistent.
    pub fn build(self) -> Result<StepSequencer<T, A, M, C, D, H>> {
        let timer = self.timer.ok_or(SequencerError::MissingComponent("timer"))?;
        let actuator = self.actuator.ok_or(SequencerError::MissingComponent("actuator"))?;
        let source = self.source.ok_or(SequencerError::MissingComponent("source"))?;
        let clock = self.clock.ok_or(SequencerError::MissingComponent("clock"))?;
        let delay = self.delay.ok_or(SequencerError::MissingComponent("delay"))?;
        let timer_config = self
            .timer_config
            .ok_or(SequencerError::MissingComponent("timer_config"))?;

        timer_config.validate()?;

        Ok(StepSequencer::new(
            timer,
            actuator,
            source,
            clock,
            delay,
            self.hook,
            timer_config,
        ))
    }
}
