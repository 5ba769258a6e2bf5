//! Step actuator seam and its implementations.
//!
//! An actuator owns the STEP/DIR outputs and the logical [`Position`]. The
//! sequencer drives it from the step handler, so every method here runs in
//! interrupt context.

mod callback;
mod pin;
mod position;

pub use callback::CallbackActuator;
pub use pin::PinActuator;
pub use position::Position;

use crate::error::ActuatorError;
use crate::motion::Direction;

/// Drives the physical step and direction signals.
///
/// A step is two [`toggle_step`](Self::toggle_step) calls, rising then
/// falling edge, with one [`advance_position`](Self::advance_position) in
/// between.
pub trait StepActuator {
    /// Drive the direction output. Called before every step.
    fn set_direction(&mut self, direction: Direction) -> Result<(), ActuatorError>;

    /// Flip the step output.
    fn toggle_step(&mut self) -> Result<(), ActuatorError>;

    /// Move the logical position by `delta` steps.
    fn advance_position(&mut self, delta: i64);

    /// Current logical position in steps.
    fn position(&self) -> i64;

    /// Overwrite the logical position, e.g. after homing.
    fn set_position(&mut self, steps: i64);
}
