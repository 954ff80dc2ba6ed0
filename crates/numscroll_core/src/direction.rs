//! Orientation, increment direction and step resolution
//!
//! Dragging "against" the configured increment direction raises the value,
//! dragging "with" it lowers it. [`IncrementDirection::step`] is the only
//! place that sign convention lives.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::range::ValueRange;

/// Drag axis of a scroller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Vertical drags, measured against the scroller's height (default)
    #[default]
    Vertical,
    /// Horizontal drags, measured against the scroller's width
    Horizontal,
}

impl Orientation {
    /// Pick the pixel extent along this axis
    pub fn extent(&self, width: f32, height: f32) -> f32 {
        match self {
            Orientation::Vertical => height,
            Orientation::Horizontal => width,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Screen direction in which the value increases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncrementDirection {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl IncrementDirection {
    /// The axis this direction lies on
    pub fn orientation(&self) -> Orientation {
        match self {
            IncrementDirection::Up | IncrementDirection::Down => Orientation::Vertical,
            IncrementDirection::Left | IncrementDirection::Right => Orientation::Horizontal,
        }
    }

    /// Whether a negative drag (up or left) increments
    pub fn increments_on_negative(&self) -> bool {
        matches!(self, IncrementDirection::Up | IncrementDirection::Left)
    }

    /// Apply one step for a threshold crossing, bounded by `range`
    ///
    /// | direction   | negative crossing | positive crossing |
    /// |-------------|-------------------|-------------------|
    /// | Up, Left    | `+step` (≤ max)   | `-step` (≥ min)   |
    /// | Down, Right | `-step` (≥ min)   | `+step` (≤ max)   |
    pub fn step(&self, crossing: Crossing, value: f32, step: f32, range: ValueRange) -> f32 {
        let increment = match crossing {
            Crossing::Negative => self.increments_on_negative(),
            Crossing::Positive => !self.increments_on_negative(),
        };
        if increment {
            (value + step).min(range.max).max(range.min)
        } else {
            (value - step).max(range.min).min(range.max)
        }
    }

    /// Sign applied to a sync-mode indicator offset
    ///
    /// The indicator moves towards the increment side as the value rises.
    pub fn indicator_sign(&self) -> f32 {
        if self.increments_on_negative() {
            -1.0
        } else {
            1.0
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IncrementDirection::Up => "up",
            IncrementDirection::Down => "down",
            IncrementDirection::Left => "left",
            IncrementDirection::Right => "right",
        }
    }
}

impl fmt::Display for IncrementDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which side of the drag threshold was crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crossing {
    /// Cumulative drag reached `-threshold` (dragged up or left)
    Negative,
    /// Cumulative drag reached `+threshold` (dragged down or right)
    Positive,
}

impl Crossing {
    /// Crossing implied by the sign of a signed distance (zero counts as positive)
    pub fn from_sign(distance: f32) -> Self {
        if distance >= 0.0 {
            Crossing::Positive
        } else {
            Crossing::Negative
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> ValueRange {
        ValueRange::default()
    }

    #[test]
    fn test_up_and_left_increment_on_negative() {
        for dir in [IncrementDirection::Up, IncrementDirection::Left] {
            assert_eq!(dir.step(Crossing::Negative, 0.0, 1.0, range()), 1.0);
            assert_eq!(dir.step(Crossing::Positive, 0.0, 1.0, range()), -1.0);
        }
    }

    #[test]
    fn test_down_and_right_increment_on_positive() {
        for dir in [IncrementDirection::Down, IncrementDirection::Right] {
            assert_eq!(dir.step(Crossing::Negative, 0.0, 1.0, range()), -1.0);
            assert_eq!(dir.step(Crossing::Positive, 0.0, 1.0, range()), 1.0);
        }
    }

    #[test]
    fn test_step_is_bounded() {
        let up = IncrementDirection::Up;
        assert_eq!(up.step(Crossing::Negative, 10.0, 1.0, range()), 10.0);
        assert_eq!(up.step(Crossing::Negative, 9.5, 1.0, range()), 10.0);
        assert_eq!(up.step(Crossing::Positive, -10.0, 3.0, range()), -10.0);
    }

    #[test]
    fn test_orientation_from_direction() {
        assert_eq!(IncrementDirection::Up.orientation(), Orientation::Vertical);
        assert_eq!(IncrementDirection::Right.orientation(), Orientation::Horizontal);
        assert_eq!(Orientation::Horizontal.extent(40.0, 60.0), 40.0);
        assert_eq!(Orientation::Vertical.extent(40.0, 60.0), 60.0);
    }

    #[test]
    fn test_crossing_from_sign() {
        assert_eq!(Crossing::from_sign(-0.1), Crossing::Negative);
        assert_eq!(Crossing::from_sign(0.0), Crossing::Positive);
        assert_eq!(Crossing::from_sign(45.0), Crossing::Positive);
    }
}
