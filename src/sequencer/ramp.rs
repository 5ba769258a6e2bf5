//! Ramp-aware control for sequencers driven by a [`RampSource`].
//!
//! Every mutator here follows the same protocol: disarm the timer, change
//! the ramp, ask it for a fresh interval, then re-arm for whatever part of
//! that interval has not already elapsed since the last step started.
//! Disarming first keeps the step handler from observing a half-updated
//! ramp.

use embedded_hal::delay::DelayNs;
use libm::fabsf;

use crate::actuator::StepActuator;
use crate::config::units::Micros;
use crate::error::Result;
use crate::motion::RampSource;
use crate::timer::{Clock, TimerService};

use super::driver::StepSequencer;

impl<T, A, M, C, D, H> StepSequencer<T, A, M, C, D, H>
where
    T: TimerService,
    A: StepActuator,
    M: RampSource,
    C: Clock,
    D: DelayNs,
    H: FnMut(),
{
    /// Set an absolute target position. No-op if it is already the target.
    pub fn move_to(&mut self, absolute: i64) -> Result<()> {
        if self.source.target() == absolute {
            return Ok(());
        }

        self.disarm();
        self.source.set_target(absolute);
        debug!("move_to {}", absolute);
        self.reschedule()
    }

    /// Set a target relative to the current position, saturating at the
    /// `i64` limits.
    pub fn move_by(&mut self, relative: i64) -> Result<()> {
        self.move_to(self.actuator.position().saturating_add(relative))
    }

    /// Change the speed ceiling, in steps per second.
    ///
    /// The sign is ignored. Zero and non-finite speeds are ignored, as is a
    /// speed equal to the current ceiling.
    pub fn set_max_speed(&mut self, speed: f32) -> Result<()> {
        let speed = fabsf(speed);
        if speed == 0.0 || !speed.is_finite() || speed == self.source.max_speed() {
            return Ok(());
        }

        self.disarm();
        self.source.set_max_speed(speed);
        debug!("max speed {}", speed);
        self.reschedule()
    }

    /// Change the acceleration, in steps per second squared.
    ///
    /// The sign is ignored. Zero is ignored, as is a value equal to the
    /// current acceleration.
    pub fn set_acceleration(&mut self, acceleration: f32) -> Result<()> {
        let acceleration = fabsf(acceleration);
        if acceleration == 0.0 || !acceleration.is_finite() || acceleration == self.source.acceleration() {
            return Ok(());
        }

        self.disarm();
        self.source.set_acceleration(acceleration);
        debug!("acceleration {}", acceleration);
        self.reschedule()
    }

    /// Decelerate to rest as quickly as the acceleration allows.
    ///
    /// Retargets to the shortest stopping distance instead of cutting the
    /// timer; use [`stop`](Self::stop) for an immediate halt.
    pub fn stop_smoothly(&mut self) -> Result<()> {
        let speed = self.source.speed();
        if speed == 0.0 {
            return Ok(());
        }

        let steps = (speed * speed / (2.0 * self.source.acceleration())) as i64 + 1;
        debug!("stopping within {} steps", steps);
        if speed > 0.0 {
            self.move_by(steps)
        } else {
            self.move_by(-steps)
        }
    }

    /// Whether the motor is moving or has somewhere left to go.
    pub fn is_running(&self) -> bool {
        self.source.speed() != 0.0 || self.distance_to_go() != 0
    }

    /// Steps from the current position to the target, saturating at the
    /// `i64` limits.
    #[inline]
    pub fn distance_to_go(&self) -> i64 {
        self.source.target().saturating_sub(self.actuator.position())
    }

    /// Current signed speed in steps per second.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.source.speed()
    }

    /// Absolute target position.
    #[inline]
    pub fn target(&self) -> i64 {
        self.source.target()
    }

    fn reschedule(&mut self) -> Result<()> {
        let interval = self.source.recompute(self.actuator.position());
        if interval.is_zero() {
            debug!("at target, nothing to schedule");
            return Ok(());
        }

        let elapsed = self.state.elapsed_since_step(self.clock.now());
        let remaining = if elapsed < interval {
            interval - elapsed
        } else {
            Micros::ZERO
        };

        self.start(remaining).map(|_| ())
    }
}
