//! Host clock backed by the operating system.

use std::time::Instant;

use crate::config::units::Timestamp;

use super::Clock;

/// Monotonic microsecond clock for host builds.
///
/// Readings are truncated to 32 bits, so they wrap exactly like a hardware
/// microsecond counter would.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemClock {
    created_at: Instant,
}

impl SystemClock {
    /// Start a clock at zero.
    pub fn new() -> SystemClock {
        SystemClock::default()
    }
}

impl Default for SystemClock {
    fn default() -> SystemClock {
        SystemClock {
            created_at: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.created_at.elapsed().as_micros() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_advances() {
        let clock = SystemClock::new();
        let first = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = clock.now();

        assert!(second.elapsed_since(first).value() >= 2000);
    }
}
