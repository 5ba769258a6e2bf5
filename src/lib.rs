//! # interrupt-stepper
//!
//! Timer-interrupt driven stepper motor sequencing with self-correcting step timing.
//!
//! ## Features
//!
//! - **Interrupt driven**: Each step is taken from a one-shot timer interrupt, no polling loop
//! - **Self-correcting timing**: The next reload subtracts the measured step time and the timer's setup latency
//! - **Safe clamping**: Unreachable or underflowed reload periods fall back to the timer's minimum
//! - **Acceleration ramps**: Retarget, change speed or acceleration while moving
//! - **embedded-hal 1.0**: Uses `OutputPin` for STEP/DIR, `DelayNs` for sub-resolution waits
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use interrupt_stepper::{AccelRamp, PinActuator, SequencerBuilder, SystemConfig};
//!
//! // Load timer limits and axis parameters from TOML
//! let config: SystemConfig = interrupt_stepper::load_config("axes.toml")?;
//! let axis = config.axis("x").unwrap();
//!
//! let mut x = SequencerBuilder::new()
//!     .from_config(&config, "x")?
//!     .timer(&mut tc0)
//!     .actuator(PinActuator::new(step_pin, dir_pin).invert_direction(axis.invert_direction))
//!     .source(AccelRamp::from_config(axis))
//!     .clock(micros)
//!     .delay(delay)
//!     .build()?;
//!
//! x.attach_interrupt(on_tc0);
//! x.move_to(3200)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and a host `SystemClock`
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// This must go first so the logging macros are visible everywhere else
#[macro_use]
mod fmt;

// Core modules
pub mod actuator;
pub mod config;
pub mod error;
pub mod motion;
pub mod sequencer;
pub mod timer;

// Re-exports for ergonomic API
pub use actuator::{CallbackActuator, PinActuator, StepActuator};
pub use config::{validate_config, AxisConfig, SystemConfig, TimerConfig};
pub use error::{Error, Result};
pub use motion::{AccelRamp, Direction, MotionSource, RampSource};
pub use sequencer::{SequencerBuilder, StartOutcome, StepEvent, StepOutcome, StepSequencer};
pub use timer::{Clock, TimerService};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

#[cfg(feature = "std")]
pub use timer::SystemClock;

// Unit types
pub use config::units::{Micros, StepsPerSec, StepsPerSecSquared, Timestamp};
