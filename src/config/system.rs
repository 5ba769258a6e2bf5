//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::axis::AxisConfig;
use super::timer::TimerConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Named hardware timer configurations.
    #[serde(default)]
    pub timers: FnvIndexMap<String<32>, TimerConfig, 8>,

    /// Named axis configurations.
    #[serde(default)]
    pub axes: FnvIndexMap<String<32>, AxisConfig, 8>,
}

impl SystemConfig {
    /// Get a timer configuration by name.
    pub fn timer(&self, name: &str) -> Option<&TimerConfig> {
        self.timers
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get an axis configuration by name.
    pub fn axis(&self, name: &str) -> Option<&AxisConfig> {
        self.axes
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Timer configuration driving the named axis.
    ///
    /// `None` if either the axis or its timer is missing.
    pub fn timer_for_axis(&self, axis: &str) -> Option<&TimerConfig> {
        self.axis(axis).and_then(|a| self.timer(a.timer.as_str()))
    }

    /// List all timer names.
    pub fn timer_names(&self) -> impl Iterator<Item = &str> {
        self.timers.keys().map(|s| s.as_str())
    }

    /// List all axis names.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(|s| s.as_str())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            timers: FnvIndexMap::new(),
            axes: FnvIndexMap::new(),
        }
    }
}
