//! Scroller and target configuration
//!
//! Every field has a documented default so configs can be written partially,
//! in code with `..Default::default()` or in TOML with missing keys.

use serde::{Deserialize, Serialize};

use crate::direction::{IncrementDirection, Orientation};
use crate::error::{ConfigError, Result};
use crate::range::ValueRange;

/// Smallest allowed auto-increment period in milliseconds
pub const MIN_AUTO_INCREMENT_DELAY_MS: u64 = 50;

/// Largest allowed far-scroll threshold
pub const MAX_FAR_SCROLL_THRESHOLD: f32 = 0.99;

fn default_step() -> f32 {
    1.0
}

fn default_scroll_distance_factor() -> f32 {
    100.0
}

fn default_line_speed() -> f32 {
    1.5
}

fn default_true() -> bool {
    true
}

fn default_scaling_factor() -> f32 {
    4.0
}

fn default_far_scroll_threshold() -> f32 {
    0.99
}

fn default_auto_increment_delay() -> u64 {
    100
}

/// Configuration for a single-value scroller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollerConfig {
    /// Drag axis (default: vertical)
    #[serde(default)]
    pub orientation: Orientation,
    /// Direction in which the value increases (default: up)
    #[serde(default)]
    pub direction: IncrementDirection,
    /// Initial value, clamped into `range` (default: 0)
    #[serde(default)]
    pub start_value: f32,
    /// Amount added or removed per commit (default: 1)
    #[serde(default = "default_step")]
    pub step: f32,
    /// Allowed values (default: -10..=10)
    #[serde(default)]
    pub range: ValueRange,
    /// Pixels of drag needed to commit one step (default: 100)
    #[serde(default = "default_scroll_distance_factor")]
    pub scroll_distance_factor: f32,
    /// Free-drag indicator speed; the offset moves `delta * line_speed / 8` (default: 1.5)
    #[serde(default = "default_line_speed")]
    pub line_speed: f32,
    /// Indicator tracks the value instead of raw drag distance (default: true)
    #[serde(default = "default_true")]
    pub sync_indicator_with_value: bool,
}

impl Default for ScrollerConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            direction: IncrementDirection::Up,
            start_value: 0.0,
            step: default_step(),
            range: ValueRange::default(),
            scroll_distance_factor: default_scroll_distance_factor(),
            line_speed: default_line_speed(),
            sync_indicator_with_value: true,
        }
    }
}

impl ScrollerConfig {
    /// Config for a scroller moving along `direction`'s axis
    pub fn with_direction(direction: IncrementDirection) -> Self {
        Self {
            orientation: direction.orientation(),
            direction,
            ..Default::default()
        }
    }

    /// Config with a free-drag indicator
    pub fn free_indicator() -> Self {
        Self {
            sync_indicator_with_value: false,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_axis(self.orientation, self.direction)?;
        check_step(self.step)?;
        check_distance_factor(self.scroll_distance_factor)?;
        self.range.validate()
    }
}

/// Scroller-wide settings of a detached (multi-target) scroller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetachedScrollerConfig {
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub direction: IncrementDirection,
    #[serde(default = "default_line_speed")]
    pub line_speed: f32,
    #[serde(default = "default_true")]
    pub sync_indicator_with_value: bool,
}

impl Default for DetachedScrollerConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            direction: IncrementDirection::Up,
            line_speed: default_line_speed(),
            sync_indicator_with_value: true,
        }
    }
}

impl DetachedScrollerConfig {
    pub fn with_direction(direction: IncrementDirection) -> Self {
        Self {
            orientation: direction.orientation(),
            direction,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_axis(self.orientation, self.direction)
    }

    /// Check that a target's behavior can run under this scroller
    pub fn check_target(&self, behavior: &TargetBehavior) -> Result<()> {
        behavior.validate()?;
        if behavior.auto_increment_on_far_scroll && self.sync_indicator_with_value {
            return Err(ConfigError::AutoIncrementWithSync);
        }
        Ok(())
    }
}

/// Per-target behavior of a detached scroller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetBehavior {
    /// Initial value, clamped into `range` (default: 0)
    #[serde(default)]
    pub start_value: f32,
    #[serde(default = "default_step")]
    pub step: f32,
    #[serde(default)]
    pub range: ValueRange,
    #[serde(default = "default_scroll_distance_factor")]
    pub scroll_distance_factor: f32,
    /// Shrink the commit threshold for fast drags (default: false)
    #[serde(default)]
    pub use_dynamic_distance_factor: bool,
    /// `k` in `1 / (1 + k * velocity^2)` (default: 4)
    #[serde(default = "default_scaling_factor")]
    pub dynamic_scaling_factor: f32,
    /// Keep stepping while the indicator is held near an edge (default: false)
    #[serde(default)]
    pub auto_increment_on_far_scroll: bool,
    /// Fraction of the half-extent the indicator must pass, in `[0, 0.99]` (default: 0.99)
    #[serde(default = "default_far_scroll_threshold")]
    pub far_scroll_threshold: f32,
    /// Auto-increment period, at least 50ms (default: 100)
    #[serde(default = "default_auto_increment_delay")]
    pub auto_increment_delay_ms: u64,
    /// Double tap opens a text edit session (default: false)
    #[serde(default)]
    pub double_tap_to_edit: bool,
}

impl Default for TargetBehavior {
    fn default() -> Self {
        Self {
            start_value: 0.0,
            step: default_step(),
            range: ValueRange::default(),
            scroll_distance_factor: default_scroll_distance_factor(),
            use_dynamic_distance_factor: false,
            dynamic_scaling_factor: default_scaling_factor(),
            auto_increment_on_far_scroll: false,
            far_scroll_threshold: default_far_scroll_threshold(),
            auto_increment_delay_ms: default_auto_increment_delay(),
            double_tap_to_edit: false,
        }
    }
}

impl TargetBehavior {
    pub fn validate(&self) -> Result<()> {
        check_step(self.step)?;
        check_distance_factor(self.scroll_distance_factor)?;
        self.range.validate()?;
        if !(0.0..=MAX_FAR_SCROLL_THRESHOLD).contains(&self.far_scroll_threshold) {
            return Err(ConfigError::FarScrollThreshold(self.far_scroll_threshold));
        }
        if self.auto_increment_delay_ms < MIN_AUTO_INCREMENT_DELAY_MS {
            return Err(ConfigError::AutoIncrementDelay(self.auto_increment_delay_ms));
        }
        if !self.dynamic_scaling_factor.is_finite() || self.dynamic_scaling_factor < 0.0 {
            return Err(ConfigError::ScalingFactor(self.dynamic_scaling_factor));
        }
        Ok(())
    }
}

fn check_axis(orientation: Orientation, direction: IncrementDirection) -> Result<()> {
    let expected = direction.orientation();
    if orientation != expected {
        return Err(ConfigError::DirectionMismatch {
            direction: direction.name(),
            expected: expected.name(),
            actual: orientation.name(),
        });
    }
    Ok(())
}

fn check_step(step: f32) -> Result<()> {
    if step.is_finite() && step > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveStep(step))
    }
}

fn check_distance_factor(factor: f32) -> Result<()> {
    if factor.is_finite() && factor > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveDistanceFactor(factor))
    }
}
