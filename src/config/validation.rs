//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{AxisConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Every timer satisfies `min_reliable_period < max_period`
/// - Every axis references a declared timer
/// - Axis max speed and acceleration are positive
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for timer in config.timers.values() {
        timer.validate()?;
    }

    for (name, axis) in config.axes.iter() {
        validate_axis(name.as_str(), axis, config)?;
    }

    Ok(())
}

fn validate_axis(name: &str, axis: &AxisConfig, config: &SystemConfig) -> Result<()> {
    if config.timer(axis.timer.as_str()).is_none() {
        return Err(Error::Config(ConfigError::UnknownTimer {
            axis: heapless::String::try_from(name).unwrap_or_default(),
            timer: axis.timer.clone(),
        }));
    }

    // Speed ceiling must be positive
    if axis.max_speed.0 <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidMaxSpeed(axis.max_speed.0)));
    }

    // A zero acceleration never leaves the first step interval
    if axis.acceleration.0 <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidAcceleration(
            axis.acceleration.0,
        )));
    }

    Ok(())
}
