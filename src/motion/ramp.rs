//! Constant-acceleration ramp with on-the-fly retargeting.
//!
//! Implements the step-interval recurrence from D. Austin, "Generate stepper
//! motor speed profiles in real time" (2005), as popularised by the Arduino
//! AccelStepper library:
//!
//! - first interval `c0 = 0.676 * sqrt(2 / a)` seconds (equations 7 and 15)
//! - next interval `cn = cn-1 - 2 cn-1 / (4n + 1)` (equation 13)
//! - steps needed to stop `v^2 / 2a` (equation 16)
//!
//! `n` counts steps into the current ramp and goes negative while
//! decelerating, which lets the same recurrence run the ramp backwards.

use libm::{fabsf, fmaxf, sqrtf};

use crate::config::units::{Micros, StepsPerSec, StepsPerSecSquared};
use crate::config::AxisConfig;

use super::source::{MotionSource, RampSource};
use super::Direction;

/// AccelStepper-style acceleration ramp.
#[derive(Debug, Clone)]
pub struct AccelRamp {
    /// Absolute target position in steps.
    target: i64,

    /// Current signed speed in steps/sec.
    speed: f32,

    /// Speed ceiling in steps/sec.
    max_speed: f32,

    /// Acceleration in steps/sec².
    acceleration: f32,

    /// Step counter within the ramp; negative while decelerating.
    n: i64,

    /// First step interval in microseconds.
    c0: f32,

    /// Last computed step interval in microseconds.
    cn: f32,

    /// Interval floor at max speed in microseconds.
    cmin: f32,

    /// Direction of travel.
    direction: Direction,
}

impl AccelRamp {
    /// Create a stationary ramp targeting position 0.
    pub fn new(max_speed: StepsPerSec, acceleration: StepsPerSecSquared) -> Self {
        let mut ramp = Self {
            target: 0,
            speed: 0.0,
            max_speed: 0.0,
            acceleration: 0.0,
            n: 0,
            c0: 0.0,
            cn: 0.0,
            cmin: 1.0,
            direction: Direction::Clockwise,
        };
        ramp.set_max_speed(max_speed.0);
        ramp.set_acceleration(acceleration.0);
        ramp
    }

    /// Create a ramp from an axis configuration.
    pub fn from_config(config: &AxisConfig) -> Self {
        Self::new(config.max_speed, config.acceleration)
    }

    /// Steps remaining until the target, from `position`. Saturates at the
    /// `i64` limits.
    #[inline]
    pub fn distance_to_go(&self, position: i64) -> i64 {
        self.target.saturating_sub(position)
    }

    /// Steps needed to come to rest from the current speed.
    #[inline]
    pub fn steps_to_stop(&self) -> i64 {
        if self.acceleration > 0.0 {
            ((self.speed * self.speed) / (2.0 * self.acceleration)) as i64
        } else {
            0
        }
    }

    /// Current position in the ramp recurrence.
    #[inline]
    pub fn ramp_step(&self) -> i64 {
        self.n
    }

    fn compute(&mut self, position: i64) -> Micros {
        let distance_to = self.distance_to_go(position);
        let steps_to_stop = self.steps_to_stop();

        if distance_to == 0 && steps_to_stop <= 1 {
            // At the target and slow enough to stop here
            self.speed = 0.0;
            self.n = 0;
            return Micros::ZERO;
        }

        if distance_to > 0 {
            if self.n > 0 {
                // Overshooting, or heading the wrong way: start decelerating
                if steps_to_stop >= distance_to || self.direction == Direction::CounterClockwise {
                    self.n = -steps_to_stop;
                }
            } else if self.n < 0 {
                // Decelerating but there is room to speed up again
                if steps_to_stop < distance_to && self.direction == Direction::Clockwise {
                    self.n = -self.n;
                }
            }
        } else if distance_to < 0 {
            if self.n > 0 {
                if steps_to_stop >= distance_to.saturating_neg() || self.direction == Direction::Clockwise {
                    self.n = -steps_to_stop;
                }
            } else if self.n < 0 {
                if steps_to_stop < distance_to.saturating_neg() && self.direction == Direction::CounterClockwise {
                    self.n = -self.n;
                }
            }
        }

        if self.n == 0 {
            // First step from rest
            self.cn = self.c0;
            self.direction = if distance_to > 0 {
                Direction::Clockwise
            } else {
                Direction::CounterClockwise
            };
        } else {
            self.cn -= (2.0 * self.cn) / ((4 * self.n + 1) as f32);
            self.cn = fmaxf(self.cn, self.cmin);
        }
        self.n += 1;

        self.speed = 1_000_000.0 / self.cn;
        if self.direction == Direction::CounterClockwise {
            self.speed = -self.speed;
        }

        // A zero interval would read as "stop"
        Micros((self.cn as u32).max(1))
    }
}

impl MotionSource for AccelRamp {
    fn next_interval(&mut self, position: i64) -> Micros {
        self.compute(position)
    }

    fn direction(&self) -> Option<Direction> {
        Some(self.direction)
    }
}

impl RampSource for AccelRamp {
    fn target(&self) -> i64 {
        self.target
    }

    fn set_target(&mut self, target: i64) {
        self.target = target;
    }

    fn max_speed(&self) -> f32 {
        self.max_speed
    }

    fn set_max_speed(&mut self, speed: f32) {
        let speed = fabsf(speed);
        self.max_speed = speed;
        self.cmin = 1_000_000.0 / speed;
        // Already accelerating: restart the ramp count from the current speed
        if self.n > 0 {
            self.n = self.steps_to_stop();
        }
    }

    fn acceleration(&self) -> f32 {
        self.acceleration
    }

    fn set_acceleration(&mut self, acceleration: f32) {
        let acceleration = fabsf(acceleration);
        if acceleration == 0.0 {
            return;
        }
        // Equation 17: keep the current speed at the new rate
        self.n = (self.n as f32 * (self.acceleration / acceleration)) as i64;
        // Equation 15
        self.c0 = 0.676 * sqrtf(2.0 / acceleration) * 1_000_000.0;
        self.acceleration = acceleration;
    }

    fn speed(&self) -> f32 {
        self.speed
    }
}
