//! STEP/DIR driver over embedded-hal output pins.

use embedded_hal::digital::OutputPin;

use crate::error::ActuatorError;
use crate::motion::Direction;

use super::position::Position;
use super::StepActuator;

/// Actuator for step/direction driver ICs (A4988, DRV8825, TMC2209, ...).
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
pub struct PinActuator<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    /// STEP pin (one pulse per step).
    step_pin: STEP,

    /// DIR pin (high = CW, low = CCW, or inverted).
    dir_pin: DIR,

    /// Level the STEP pin was last driven to.
    step_high: bool,

    /// Current direction (cached to avoid unnecessary pin writes).
    current_direction: Option<Direction>,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    /// Logical position.
    position: Position,
}

impl<STEP, DIR> PinActuator<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    /// Create an actuator at position 0.
    ///
    /// The STEP pin is assumed to idle low.
    pub fn new(step_pin: STEP, dir_pin: DIR) -> Self {
        Self {
            step_pin,
            dir_pin,
            step_high: false,
            current_direction: None,
            invert_direction: false,
            position: Position::new(),
        }
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Direction the DIR pin currently encodes, if it was driven yet.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.current_direction
    }

    /// Give the pins back.
    pub fn release(self) -> (STEP, DIR) {
        (self.step_pin, self.dir_pin)
    }
}

impl<STEP, DIR> StepActuator for PinActuator<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    fn set_direction(&mut self, direction: Direction) -> Result<(), ActuatorError> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        let pin_high = match direction {
            Direction::Clockwise => !self.invert_direction,
            Direction::CounterClockwise => self.invert_direction,
        };

        if pin_high {
            self.dir_pin.set_high().map_err(|_| ActuatorError::DirPin)?;
        } else {
            self.dir_pin.set_low().map_err(|_| ActuatorError::DirPin)?;
        }

        self.current_direction = Some(direction);
        Ok(())
    }

    fn toggle_step(&mut self) -> Result<(), ActuatorError> {
        if self.step_high {
            self.step_pin.set_low().map_err(|_| ActuatorError::StepPin)?;
        } else {
            self.step_pin.set_high().map_err(|_| ActuatorError::StepPin)?;
        }
        self.step_high = !self.step_high;
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

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

    #[test]
    fn test_step_pulse_edges() {
        let step = PinMock::new(&[
            Transaction::set(State::High),
            Transaction::set(State::Low),
        ]);
        let dir = PinMock::new(&[Transaction::set(State::High)]);

        let mut actuator = PinActuator::new(step, dir);
        actuator.set_direction(Direction::Clockwise).unwrap();
        actuator.toggle_step().unwrap();
        actuator.advance_position(1);
        actuator.toggle_step().unwrap();

        assert_eq!(actuator.position(), 1);

        let (mut step, mut dir) = actuator.release();
        step.done();
        dir.done();
    }

    #[test]
    fn test_direction_written_only_on_change() {
        let step = PinMock::new(&[]);
        let dir = PinMock::new(&[
            Transaction::set(State::Low),
            Transaction::set(State::High),
        ]);

        let mut actuator = PinActuator::new(step, dir);
        actuator.set_direction(Direction::CounterClockwise).unwrap();
        actuator.set_direction(Direction::CounterClockwise).unwrap();
        actuator.set_direction(Direction::Clockwise).unwrap();

        let (mut step, mut dir) = actuator.release();
        step.done();
        dir.done();
    }

    #[test]
    fn test_inverted_direction() {
        let step = PinMock::new(&[]);
        let dir = PinMock::new(&[Transaction::set(State::Low)]);

        let mut actuator = PinActuator::new(step, dir).invert_direction(true);
        actuator.set_direction(Direction::Clockwise).unwrap();
        assert_eq!(actuator.direction(), Some(Direction::Clockwise));

        let (mut step, mut dir) = actuator.release();
        step.done();
        dir.done();
    }
}
