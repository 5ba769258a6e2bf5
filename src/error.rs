//! Error types for interrupt-stepper.
//!
//! Timing edge cases (too-short or overflowing reload periods) are never
//! reported here: they are clamped by the sequencer. What remains are
//! configuration problems, pin failures and incomplete sequencer assembly.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all interrupt-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Step or direction output error
    Actuator(ActuatorError),
    /// Sequencer assembly error
    Sequencer(SequencerError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Timer periods violate `min_reliable_period < max_period`
    InvalidTimerPeriods {
        /// Minimum reliable period in microseconds
        min: u32,
        /// Maximum period in microseconds
        max: u32,
    },
    /// Timer name not found in configuration
    TimerNotFound(heapless::String<32>),
    /// Axis name not found in configuration
    AxisNotFound(heapless::String<32>),
    /// Axis references a timer that is not declared
    UnknownTimer {
        /// Axis name
        axis: heapless::String<32>,
        /// Referenced timer name
        timer: heapless::String<32>,
    },
    /// Invalid max speed (must be > 0)
    InvalidMaxSpeed(f32),
    /// Invalid acceleration (must be > 0)
    InvalidAcceleration(f32),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Step actuator errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorError {
    /// Driving the STEP output failed
    StepPin,
    /// Driving the DIR output failed
    DirPin,
}

/// Sequencer assembly errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerError {
    /// A required collaborator was not supplied to the builder
    MissingComponent(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Actuator(e) => write!(f, "Actuator error: {}", e),
            Error::Sequencer(e) => write!(f, "Sequencer error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidTimerPeriods { min, max } => write!(
                f,
                "Invalid timer periods: min ({} us) must be < max ({} us)",
                min, max
            ),
            ConfigError::TimerNotFound(name) => write!(f, "Timer '{}' not found", name),
            ConfigError::AxisNotFound(name) => write!(f, "Axis '{}' not found", name),
            ConfigError::UnknownTimer { axis, timer } => {
                write!(f, "Axis '{}' references unknown timer '{}'", axis, timer)
            }
            ConfigError::InvalidMaxSpeed(v) => write!(f, "Invalid max speed: {}. Must be > 0", v),
            ConfigError::InvalidAcceleration(v) => {
                write!(f, "Invalid acceleration: {}. Must be > 0", v)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActuatorError::StepPin => write!(f, "STEP pin operation failed"),
            ActuatorError::DirPin => write!(f, "DIR pin operation failed"),
        }
    }
}

impl fmt::Display for SequencerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequencerError::MissingComponent(name) => write!(f, "{} is required", name),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Error::Actuator(e)
    }
}

impl From<SequencerError> for Error {
    fn from(e: SequencerError) -> Self {
        Error::Sequencer(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for ActuatorError {}

#[cfg(feature = "std")]
impl std::error::Error for SequencerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_timer_periods() {
        let err = Error::from(ConfigError::InvalidTimerPeriods { min: 10, max: 5 });
        let msg = format!("{}", err);
        assert!(msg.contains("min (10 us)"));
        assert!(msg.contains("max (5 us)"));
    }

    #[test]
    fn test_missing_component_message() {
        let err = Error::from(SequencerError::MissingComponent("timer"));
        assert_eq!(format!("{}", err), "Sequencer error: timer is required");
    }
}
