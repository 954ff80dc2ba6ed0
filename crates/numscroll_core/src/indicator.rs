//! Indicator line positioning
//!
//! The indicator sits at the center of the scroller (offset 0) and moves
//! within `[-extent / 2, extent / 2]` along the drag axis. In sync mode its
//! offset mirrors the value's position in its range; in free-drag mode it
//! follows the pointer and snaps back to center when the gesture ends.

use crate::direction::IncrementDirection;
use crate::range::ValueRange;

/// Divisor applied to `line_speed` for free-drag movement
const LINE_SPEED_DIVISOR: f32 = 8.0;

/// How the indicator offset is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorMode {
    /// Offset reflects the current value
    Sync,
    /// Offset follows raw drag distance
    FreeDrag,
}

impl IndicatorMode {
    pub fn from_sync_flag(sync: bool) -> Self {
        if sync {
            IndicatorMode::Sync
        } else {
            IndicatorMode::FreeDrag
        }
    }
}

/// Sync-mode offset for `value`
///
/// Values at the increment end of the range sit at the increment edge of the
/// scroller, e.g. the top edge for [`IncrementDirection::Up`].
pub fn sync_offset(
    value: f32,
    range: ValueRange,
    extent: f32,
    direction: IncrementDirection,
) -> f32 {
    let offset = range.normalize(value) * extent - extent / 2.0;
    offset * direction.indicator_sign()
}

/// Indicator state of one scroller
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPositioner {
    mode: IndicatorMode,
    line_speed: f32,
    offset: f32,
}

impl IndicatorPositioner {
    pub fn new(mode: IndicatorMode, line_speed: f32) -> Self {
        Self {
            mode,
            line_speed,
            offset: 0.0,
        }
    }

    pub fn mode(&self) -> IndicatorMode {
        self.mode
    }

    /// Current offset from center in pixels
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Recompute the sync-mode offset; ignored in free-drag mode
    pub fn sync_to_value(
        &mut self,
        value: f32,
        range: ValueRange,
        extent: f32,
        direction: IncrementDirection,
    ) -> f32 {
        if self.mode == IndicatorMode::Sync {
            self.offset = sync_offset(value, range, extent, direction);
        }
        self.offset
    }

    /// Move the free-drag indicator by a drag delta; ignored in sync mode
    pub fn follow_drag(&mut self, delta: f32, extent: f32) -> f32 {
        if self.mode == IndicatorMode::FreeDrag {
            let half = (extent / 2.0).max(0.0);
            let moved = self.offset + delta * (self.line_speed / LINE_SPEED_DIVISOR);
            self.offset = moved.max(-half).min(half);
        }
        self.offset
    }

    /// Snap the free-drag indicator back to center; ignored in sync mode
    pub fn release(&mut self) {
        if self.mode == IndicatorMode::FreeDrag {
            self.offset = 0.0;
        }
    }

    /// Whether the indicator is at least `threshold` of the half-extent from center
    pub fn is_far(&self, threshold: f32, extent: f32) -> bool {
        self.offset.abs() >= threshold * extent / 2.0
    }
}
