//! Hardware timer constants.

use serde::Deserialize;

use crate::error::{ConfigError, Error, Result};

use super::units::Micros;

/// Operating limits of the hardware timer driving one sequencer.
///
/// These are properties of the target peripheral, fixed at build or init
/// time and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    /// Delay between requesting an arm and the countdown actually starting.
    #[serde(rename = "setup_latency_us")]
    pub setup_latency: Micros,

    /// Shortest period the timer fires reliably on.
    #[serde(rename = "min_period_us")]
    pub min_reliable_period: Micros,

    /// Periods at or above this value are not representable.
    #[serde(rename = "max_period_us")]
    pub max_period: Micros,

    /// Cost of reading the clock, subtracted from every step measurement.
    ///
    /// Depends on the clock-read latency of the target; calibrate per platform.
    #[serde(rename = "measurement_overhead_us", default = "default_measurement_overhead")]
    pub measurement_overhead: Micros,
}

fn default_measurement_overhead() -> Micros {
    TimerConfig::DEFAULT_MEASUREMENT_OVERHEAD
}

impl TimerConfig {
    /// Clock-read overhead measured on the SAM3X8E reference target.
    pub const DEFAULT_MEASUREMENT_OVERHEAD: Micros = Micros(2);

    /// SAM3X8E timer counter channels (Arduino Due) at the precise clock source.
    pub const SAM3X_TC: TimerConfig = TimerConfig {
        setup_latency: Micros(8),
        min_reliable_period: Micros(5),
        max_period: Micros(102_261_126),
        measurement_overhead: Micros(2),
    };

    /// Create a timer configuration, checking `min_reliable_period < max_period`.
    ///
    /// The measurement overhead starts at [`Self::DEFAULT_MEASUREMENT_OVERHEAD`].
    pub fn new(setup_latency: Micros, min_reliable_period: Micros, max_period: Micros) -> Result<Self> {
        let config = Self {
            setup_latency,
            min_reliable_period,
            max_period,
            measurement_overhead: Self::DEFAULT_MEASUREMENT_OVERHEAD,
        };
        config.validate()?;
        Ok(config)
    }

    /// Override the clock-read overhead.
    pub const fn with_measurement_overhead(mut self, overhead: Micros) -> Self {
        self.measurement_overhead = overhead;
        self
    }

    /// Check the period invariant.
    pub fn validate(&self) -> Result<()> {
        if self.min_reliable_period >= self.max_period {
            return Err(Error::Config(ConfigError::InvalidTimerPeriods {
                min: self.min_reliable_period.0,
                max: self.max_period.0,
            }));
        }
        Ok(())
    }

    /// Whether `period` can be loaded into the timer as-is.
    #[inline]
    pub fn is_schedulable(&self, period: Micros) -> bool {
        period >= self.min_reliable_period && period < self.max_period
    }

    /// Apply the clamp policy.
    ///
    /// Anything below the minimum reliable period, or at/above the maximum
    /// (which is also where a wrapped-around subtraction lands), becomes the
    /// minimum reliable period.
    #[inline]
    pub fn clamp(&self, period: Micros) -> Micros {
        if self.is_schedulable(period) {
            period
        } else {
            self.min_reliable_period
        }
    }

    /// Longest interval the caller has to busy-wait for instead of arming.
    #[inline]
    pub fn busy_wait_threshold(&self) -> Micros {
        self.setup_latency.wrapping_add(self.min_reliable_period)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::SAM3X_TC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_inverted_periods() {
        let result = TimerConfig::new(Micros(8), Micros(100), Micros(100));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidTimerPeriods { min: 100, max: 100 }))
        ));
    }

    #[test]
    fn test_clamp_bounds() {
        let config = TimerConfig::SAM3X_TC;

        assert_eq!(config.clamp(Micros(4)), Micros(5));
        assert_eq!(config.clamp(Micros(5)), Micros(5));
        assert_eq!(config.clamp(Micros(942)), Micros(942));
        assert_eq!(config.clamp(Micros(102_261_125)), Micros(102_261_125));
        assert_eq!(config.clamp(Micros(102_261_126)), Micros(5));
        assert_eq!(config.clamp(Micros(u32::MAX)), Micros(5));
    }

    #[test]
    fn test_busy_wait_threshold() {
        assert_eq!(TimerConfig::SAM3X_TC.busy_wait_threshold(), Micros(13));
    }

    #[test]
    fn test_preset_is_valid() {
        assert!(TimerConfig::SAM3X_TC.validate().is_ok());
    }
}
