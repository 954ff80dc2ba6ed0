//! Configuration error types

use thiserror::Error;

/// A scroller or target configuration that cannot be used as given.
///
/// These are raised at construction or registration time and are never
/// silently corrected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Step must be a positive, finite number
    #[error("step must be greater than 0, got {0}")]
    NonPositiveStep(f32),

    /// Scroll distance factor must be a positive, finite number
    #[error("scroll distance factor must be greater than 0, got {0}")]
    NonPositiveDistanceFactor(f32),

    /// Range bounds are inverted
    #[error("range minimum {min} is greater than maximum {max}")]
    InvertedRange { min: f32, max: f32 },

    /// Range bound is NaN or infinite
    #[error("range bounds must be finite, got {min}..={max}")]
    NonFiniteRange { min: f32, max: f32 },

    /// Orientation doesn't match the increment direction's axis
    #[error("increment direction {direction} requires {expected} orientation, got {actual}")]
    DirectionMismatch {
        direction: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// Far-scroll threshold outside [0, 0.99]
    #[error("far scroll threshold must be between 0 and 0.99, got {0}")]
    FarScrollThreshold(f32),

    /// Auto-increment period below the 50ms floor
    #[error("auto increment delay must be at least 50ms, got {0}ms")]
    AutoIncrementDelay(u64),

    /// Auto-increment needs a free-drag indicator
    #[error("auto increment on far scroll cannot be enabled while the indicator is synced with the value")]
    AutoIncrementWithSync,

    /// Dynamic scaling factor must be finite and non-negative
    #[error("dynamic scaling factor must be a finite, non-negative number, got {0}")]
    ScalingFactor(f32),
}

/// Result type for configuration checks
pub type Result<T> = std::result::Result<T, ConfigError>;
