//! Pluggable step-interval sources.

use crate::config::units::Micros;

use super::Direction;

/// Supplies the ideal interval until the next step.
///
/// Called from the step handler, i.e. in interrupt context: implementations
/// must be fast, must not block and must not touch the timer.
///
/// Any `FnMut(i64) -> Micros` closure is a motion source that never changes
/// direction.
pub trait MotionSource {
    /// Interval until the next step, given the position after the step just
    /// taken. [`Micros::ZERO`] ends the motion.
    fn next_interval(&mut self, position: i64) -> Micros;

    /// Direction of the next step, if this source decides it.
    ///
    /// `None` leaves the sequencer's current direction untouched.
    fn direction(&self) -> Option<Direction> {
        None
    }
}

impl<F> MotionSource for F
where
    F: FnMut(i64) -> Micros,
{
    fn next_interval(&mut self, position: i64) -> Micros {
        self(position)
    }
}

/// A retargetable acceleration ramp.
///
/// The sequencer disarms its timer before calling any setter here and
/// reschedules afterwards, so implementations may assume no step handler
/// runs concurrently with a setter or with [`recompute`](Self::recompute).
pub trait RampSource: MotionSource {
    /// Re-derive the interval until the next step after a parameter change.
    fn recompute(&mut self, position: i64) -> Micros {
        self.next_interval(position)
    }

    /// Absolute target position in steps.
    fn target(&self) -> i64;

    /// Set a new absolute target position.
    fn set_target(&mut self, target: i64);

    /// Speed ceiling in steps per second.
    fn max_speed(&self) -> f32;

    /// Set the speed ceiling (positive, steps per second).
    fn set_max_speed(&mut self, speed: f32);

    /// Acceleration in steps per second squared.
    fn acceleration(&self) -> f32;

    /// Set the acceleration (positive, steps per second squared).
    fn set_acceleration(&mut self, acceleration: f32);

    /// Current signed speed in steps per second (negative when counter-clockwise).
    fn speed(&self) -> f32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_source() {
        let mut remaining = 3;
        let mut source = move |_position: i64| {
            remaining -= 1;
            if remaining > 0 {
                Micros(500)
            } else {
                Micros::ZERO
            }
        };

        assert_eq!(source.next_interval(1), Micros(500));
        assert_eq!(source.next_interval(2), Micros(500));
        assert_eq!(source.next_interval(3), Micros::ZERO);
        assert_eq!(MotionSource::direction(&source), None);
    }
}
