#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tuning for the proximity simulation. Immutable for the lifetime of an
/// organizer; a new breakpoint builds a new organizer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ProximityConfig {
    /// Pixel radius within which the pointer influences a shape.
    pub influence_radius: f32,
    /// Fraction of the gap closed per frame while organizing (0..1).
    pub organize_speed: f32,
    /// Fraction of the gap closed per frame while drifting back (0..1).
    pub decay_speed: f32,
    /// Fraction of peak proximity retained as the decay floor (0..1).
    pub memory_factor: f32,
    /// Fraction of shapes that must be organized to trigger auto-complete.
    pub auto_complete_threshold: f32,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            influence_radius: 250.0,
            organize_speed: 0.15,
            decay_speed: 0.02,
            memory_factor: 0.6,
            auto_complete_threshold: 0.65,
        }
    }
}

impl ProximityConfig {
    pub fn with_influence_radius(mut self, radius: f32) -> Self {
        self.influence_radius = radius;
        self
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.influence_radius.is_finite() || self.influence_radius <= 0.0 {
            return Err("influence_radius must be finite and > 0");
        }
        if !(0.0..=1.0).contains(&self.organize_speed) {
            return Err("organize_speed must be in [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.decay_speed) {
            return Err("decay_speed must be in [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.memory_factor) {
            return Err("memory_factor must be in [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.auto_complete_threshold) {
            return Err("auto_complete_threshold must be in [0, 1]");
        }
        Ok(())
    }

    /// Number of organized shapes (progress > 0.7) needed to auto-complete
    /// a set of `total` shapes. Rounds up; an empty set needs none.
    pub fn required_organized(&self, total: usize) -> usize {
        let raw = total as f64 * f64::from(self.auto_complete_threshold.clamp(0.0, 1.0));
        // Shave float noise so 20 × 0.65 stays 13 rather than rounding up to 14.
        let needed = (raw - 1e-6).ceil().max(0.0) as usize;
        needed.min(total)
    }
}
