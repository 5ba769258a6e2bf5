//! Configuration module for interrupt-stepper.
//!
//! Provides the hardware timer constants, per-axis ramp settings and their
//! TOML loading (with `std` feature) and validation.

mod axis;
#[cfg(feature = "std")]
mod loader;
mod system;
mod timer;
pub mod units;
mod validation;

pub use axis::AxisConfig;
pub use system::SystemConfig;
pub use timer::TimerConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Micros, StepsPerSec, StepsPerSecSquared, Timestamp};
