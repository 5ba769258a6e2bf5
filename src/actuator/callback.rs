//! Actuator over user-supplied step functions.

use crate::error::ActuatorError;
use crate::motion::Direction;

use super::position::Position;
use super::StepActuator;

/// Actuator that delegates each step to a forward or backward function.
///
/// For drivers that are not plain STEP/DIR pins (four-wire coils, shift
/// registers, remote drivers). The matching function runs on the rising
/// edge; the falling edge only completes the step. Both functions run in
/// interrupt context.
pub struct CallbackActuator<F, B>
where
    F: FnMut(),
    B: FnMut(),
{
    forward: F,
    backward: B,
    direction: Direction,
    raised: bool,
    position: Position,
}

impl<F, B> CallbackActuator<F, B>
where
    F: FnMut(),
    B: FnMut(),
{
    /// Create an actuator at position 0.
    pub fn new(forward: F, backward: B) -> Self {
        Self {
            forward,
            backward,
            direction: Direction::Clockwise,
            raised: false,
            position: Position::new(),
        }
    }
}

impl<F, B> StepActuator for CallbackActuator<F, B>
where
    F: FnMut(),
    B: FnMut(),
{
    fn set_direction(&mut self, direction: Direction) -> Result<(), ActuatorError> {
        self.direction = direction;
        Ok(())
    }

    fn toggle_step(&mut self) -> Result<(), ActuatorError> {
        if !self.raised {
            match self.direction {
                Direction::Clockwise => (self.forward)(),
                Direction::CounterClockwise => (self.backward)(),
            }
        }
        self.raised = !self.raised;
        Ok(())
    }

    #[inline]
    fn advance_position(&mut self, delta: i64) {
        self.position.advance(delta);
    }

    #[inline]
    fn position(&self) -> i64 {
        self.position.steps()
    }

    #[inline]
    fn set_position(&mut self, steps: i64) {
        self.position.set_steps(steps);
    }
}
