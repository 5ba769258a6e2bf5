//! Per-axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::units::{StepsPerSec, StepsPerSecSquared};

/// Configuration of one interrupt-driven stepper axis.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Key of the `[timers.*]` entry whose hardware timer drives this axis.
    pub timer: String<32>,

    /// Speed ceiling of the ramp.
    #[serde(rename = "max_speed_steps_per_sec")]
    pub max_speed: StepsPerSec,

    /// Ramp acceleration, also used for deceleration.
    #[serde(rename = "acceleration_steps_per_sec2")]
    pub acceleration: StepsPerSecSquared,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,
}

impl AxisConfig {
    /// Step interval at the configured max speed.
    pub fn min_step_interval_us(&self) -> Option<u32> {
        self.max_speed.interval().map(|i| i.value())
    }
}
