//! Unit types for timing and speed quantities.
//!
//! Durations and clock readings are both 32-bit microsecond counts, but they
//! are kept apart at the type level: a [`Timestamp`] wraps around with the
//! hardware clock, a [`Micros`] is a span of time.

use core::ops::{Add, Sub};

use serde::Deserialize;

/// A span of time in microseconds.
///
/// Arithmetic on `Micros` is wrapping, matching the width of the hardware
/// counters it is loaded into. Range checks are the caller's job (see
/// [`TimerConfig::clamp`](crate::config::TimerConfig::clamp)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Micros(pub u32);

impl Micros {
    /// Zero duration; as a motion interval it means "stop".
    pub const ZERO: Micros = Micros(0);

    /// Create a new Micros value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Check for the zero duration.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Modular subtraction.
    #[inline]
    pub const fn wrapping_sub(self, rhs: Micros) -> Micros {
        Micros(self.0.wrapping_sub(rhs.0))
    }

    /// Modular addition.
    #[inline]
    pub const fn wrapping_add(self, rhs: Micros) -> Micros {
        Micros(self.0.wrapping_add(rhs.0))
    }
}

impl Add for Micros {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.wrapping_add(rhs)
    }
}

impl Sub for Micros {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.wrapping_sub(rhs)
    }
}

impl From<u32> for Micros {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A reading of a free-running 32-bit microsecond clock.
///
/// The clock wraps roughly every 71.6 minutes; differences between two
/// readings are still exact as long as less than one full wrap separates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp(pub u32);

impl Timestamp {
    /// Get the raw counter value.
    #[inline]
    pub const fn ticks(self) -> u32 {
        self.0
    }

    /// Time elapsed from `earlier` to `self`, modulo 2^32.
    #[inline]
    pub const fn elapsed_since(self, earlier: Timestamp) -> Micros {
        Micros(self.0.wrapping_sub(earlier.0))
    }

    /// The reading `delta` after this one.
    #[inline]
    pub const fn offset(self, delta: Micros) -> Timestamp {
        Timestamp(self.0.wrapping_add(delta.0))
    }
}

/// Speed in steps per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct StepsPerSec(pub f32);

impl StepsPerSec {
    /// Create a new StepsPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Interval between steps at this speed, or `None` when not moving.
    pub fn interval(self) -> Option<Micros> {
        if self.0 > 0.0 {
            Some(Micros((1_000_000.0 / self.0) as u32))
        } else {
            None
        }
    }
}

/// Acceleration in steps per second squared.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct StepsPerSecSquared(pub f32);

impl StepsPerSecSquared {
    /// Create a new StepsPerSecSquared value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}
