//! Scroller targets
//!
//! A target is one independently tracked value of a detached scroller,
//! with its own step, range and interaction behavior.

use numscroll_core::{format_value, TargetBehavior};

/// Key of a target within its registry
pub type TargetId = i32;

/// Callback run with a target's value when a gesture or edit completes
pub type CommitCallback = Box<dyn FnMut(f32) + Send>;

/// A registered target
pub struct Target {
    pub(crate) value: f32,
    pub(crate) behavior: TargetBehavior,
    pub(crate) on_commit: Option<CommitCallback>,
}

impl Target {
    pub(crate) fn new(behavior: TargetBehavior, on_commit: Option<CommitCallback>) -> Self {
        Self {
            value: behavior.range.clamp(behavior.start_value),
            behavior,
            on_commit,
        }
    }

    /// Current value, always inside the behavior's range
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn behavior(&self) -> &TargetBehavior {
        &self.behavior
    }

    /// Display text for the current value
    pub fn formatted(&self) -> String {
        format_value(self.value, self.behavior.step)
    }

    /// Clamp and store a value, returning whether it changed
    pub(crate) fn set_value(&mut self, value: f32) -> bool {
        let clamped = self.behavior.range.clamp(value);
        let changed = clamped != self.value;
        self.value = clamped;
        changed
    }

    pub(crate) fn fire_commit(&mut self) -> f32 {
        if let Some(callback) = self.on_commit.as_mut() {
            callback(self.value);
        }
        self.value
    }
}

impl std::fmt::Debug for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Target")
            .field("value", &self.value)
            .field("behavior", &self.behavior)
            .field("has_on_commit", &self.on_commit.is_some())
            .finish()
    }
}
