//! Drag accumulation and threshold detection
//!
//! Drag deltas are summed until the total reaches the commit threshold in
//! either direction. With dynamic scaling the threshold shrinks for fast
//! drags so quick flicks commit steps sooner.

use crate::direction::Crossing;

/// Inverse-quadratic damping `1 / (1 + k * v^2)`
///
/// Returns 1 for a still pointer and approaches 0 as velocity grows. Negative
/// inputs are treated as 0.
pub fn scroll_factor_multiplier(velocity: f32, scaling_factor: f32) -> f32 {
    let v = velocity.max(0.0);
    let k = scaling_factor.max(0.0);
    1.0 / (1.0 + k * v * v)
}

/// Running drag distance since the last commit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragAccumulator {
    cumulative: f32,
    last_event_ms: Option<u64>,
    multiplier: Option<f32>,
}

impl DragAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance dragged since the last commit
    pub fn cumulative(&self) -> f32 {
        self.cumulative
    }

    /// Threshold multiplier from the most recent velocity sample (1 without one)
    pub fn multiplier(&self) -> f32 {
        self.multiplier.unwrap_or(1.0)
    }

    /// Add a drag delta, returning the new total
    ///
    /// Non-finite deltas are dropped so the total stays comparable.
    pub fn accumulate(&mut self, delta: f32) -> f32 {
        if delta.is_finite() {
            self.cumulative += delta;
        } else {
            tracing::debug!("dropping non-finite drag delta {}", delta);
        }
        self.cumulative
    }

    /// Pointer speed in pixels per millisecond for this delta
    ///
    /// The first sample of a gesture has no reference point and reports 0.
    pub fn velocity(&mut self, delta: f32, now_ms: u64) -> f32 {
        let velocity = match self.last_event_ms {
            Some(last) => {
                let elapsed = now_ms.saturating_sub(last).max(1);
                delta.abs() / elapsed as f32
            }
            None => 0.0,
        };
        self.last_event_ms = Some(now_ms);
        velocity
    }

    /// Recompute the threshold multiplier from this delta's velocity
    pub fn sample_velocity(&mut self, delta: f32, now_ms: u64, scaling_factor: f32) -> f32 {
        let velocity = self.velocity(delta, now_ms);
        let multiplier = scroll_factor_multiplier(velocity, scaling_factor);
        tracing::trace!(
            "drag velocity {:.3}px/ms -> multiplier {:.3}",
            velocity,
            multiplier
        );
        self.multiplier = Some(multiplier);
        multiplier
    }

    /// Check the total against `distance_factor * multiplier`
    ///
    /// On a crossing the crossed side is returned and the total drops to the
    /// distance left over past the threshold, always less than one threshold,
    /// so a single event commits at most one step.
    pub fn take_crossing(&mut self, distance_factor: f32, multiplier: f32) -> Option<Crossing> {
        let threshold = distance_factor * multiplier;
        let crossing = if self.cumulative <= -threshold {
            Crossing::Negative
        } else if self.cumulative >= threshold {
            Crossing::Positive
        } else {
            return None;
        };
        tracing::trace!(
            "drag {:.2} crossed threshold {:.2} ({:?})",
            self.cumulative,
            threshold,
            crossing
        );
        let remainder = self.cumulative % threshold;
        self.cumulative = if threshold > 0.0 && remainder.is_finite() {
            remainder
        } else {
            0.0
        };
        Some(crossing)
    }

    /// Forget velocity history; called when a new gesture starts
    pub fn begin_gesture(&mut self) {
        self.last_event_ms = None;
        self.multiplier = None;
    }

    /// Drop all accumulated distance and velocity history
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
