//! Logical step position.

/// Signed step counter, moved by exactly one per completed step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    /// Current position in steps (from origin)
    steps: i64,
}

impl Position {
    /// Create a position tracker at the origin.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a position tracker at a specific position.
    #[inline]
    pub fn at(steps: i64) -> Self {
        Self { steps }
    }

    /// Get current position in steps.
    #[inline]
    pub fn steps(&self) -> i64 {
        self.steps
    }

    /// Set position in steps.
    #[inline]
    pub fn set_steps(&mut self, steps: i64) {
        self.steps = steps;
    }

    /// Move by a number of steps, saturating at the `i64` limits.
    #[inline]
    pub fn advance(&mut self, delta: i64) {
        self.steps = self.steps.saturating_add(delta);
    }

    /// Set current position as the new origin.
    #[inline]
    pub fn set_origin(&mut self) {
        self.steps = 0;
    }

    /// Calculate steps needed to reach a target position.
    #[inline]
    pub fn steps_to(&self, target: i64) -> i64 {
        target.saturating_sub(self.steps)
    }
}
