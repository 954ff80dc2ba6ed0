//! Closed value ranges and clamping

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// An inclusive `[min, max]` interval every scroller value is kept inside
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            min: -10.0,
            max: 10.0,
        }
    }
}

impl ValueRange {
    /// Create a range, rejecting inverted or non-finite bounds
    pub fn new(min: f32, max: f32) -> Result<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    /// Check the bounds of a range built from a literal or deserialized config
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::NonFiniteRange {
                min: self.min,
                max: self.max,
            });
        }
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Bound a value into the range
    pub fn clamp(&self, value: f32) -> f32 {
        clamp(value, *self)
    }

    /// Position of `value` within the range as a fraction in `[0, 1]`
    ///
    /// A zero-width range has nowhere to move, so every value maps to 0.
    pub fn normalize(&self, value: f32) -> f32 {
        let width = self.max - self.min;
        if width == 0.0 {
            return 0.0;
        }
        (value - self.min) / width
    }

    /// Whether `value` lies inside the range (inclusive)
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Distance between the bounds
    pub fn width(&self) -> f32 {
        self.max - self.min
    }
}

/// `min(max(value, range.min), range.max)`
///
/// Written out rather than via `f32::clamp`, which panics on inverted bounds.
pub fn clamp(value: f32, range: ValueRange) -> f32 {
    value.max(range.min).min(range.max)
}
