//! Motion module for interrupt-stepper.
//!
//! Provides the step-interval source seam and a retargetable acceleration
//! ramp implementing it. Plain closures are motion sources too.

mod direction;
mod ramp;
mod source;

pub use direction::Direction;
pub use ramp::AccelRamp;
pub use source::{MotionSource, RampSource};
