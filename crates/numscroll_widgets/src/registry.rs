//! Target registry of a detached scroller
//!
//! Tracks registered targets, which one the scroller currently drives, and
//! the single open edit session. Unknown ids are ignored everywhere: targets
//! register dynamically and may be briefly absent during setup.

use numscroll_core::{Crossing, IncrementDirection, TargetBehavior};
use rustc_hash::FxHashMap;

use crate::edit::{parse_edit, EditOutcome, EditSession};
use crate::target::{CommitCallback, Target, TargetId};

/// Targets, selection and edit state
#[derive(Debug)]
pub struct TargetRegistry {
    direction: IncrementDirection,
    targets: FxHashMap<TargetId, Target>,
    selected: Option<TargetId>,
    edit: Option<EditSession>,
}

impl TargetRegistry {
    /// Create an empty registry stepping values along `direction`
    pub fn new(direction: IncrementDirection) -> Self {
        Self {
            direction,
            targets: FxHashMap::default(),
            selected: None,
            edit: None,
        }
    }

    pub fn direction(&self) -> IncrementDirection {
        self.direction
    }

    /// Register a target and return its initial value
    ///
    /// Registering an id again replaces the old target, resetting its value
    /// to the new behavior's start value. The behavior is expected to be
    /// validated by the caller.
    pub fn register(
        &mut self,
        id: TargetId,
        behavior: TargetBehavior,
        on_commit: Option<CommitCallback>,
    ) -> f32 {
        let target = Target::new(behavior, on_commit);
        let value = target.value;
        if self.targets.insert(id, target).is_some() {
            tracing::debug!("target {} re-registered, value reset to {}", id, value);
        } else {
            tracing::debug!("target {} registered with value {}", id, value);
        }
        value
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(&id)
    }

    pub fn contains(&self, id: TargetId) -> bool {
        self.targets.contains_key(&id)
    }

    /// Value of a target
    pub fn value(&self, id: TargetId) -> Option<f32> {
        self.targets.get(&id).map(Target::value)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Registered ids in ascending order
    pub fn ids(&self) -> Vec<TargetId> {
        let mut ids: Vec<_> = self.targets.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selected_id(&self) -> Option<TargetId> {
        self.selected
    }

    /// The selected target
    pub fn selected(&self) -> Option<&Target> {
        self.selected.and_then(|id| self.targets.get(&id))
    }

    /// Select the first registered id of `ids`, or nothing if none match
    pub fn link_to(&mut self, ids: &[TargetId]) {
        self.selected = ids.iter().copied().find(|id| self.targets.contains_key(id));
        tracing::debug!("scroller linked to {:?}, selected {:?}", ids, self.selected);
    }

    /// Select a target; returns whether the selection changed
    ///
    /// Unknown ids are ignored, as is any selection while an edit is open.
    pub fn select(&mut self, id: TargetId) -> bool {
        if self.edit.is_some() {
            tracing::trace!("select {} ignored while editing", id);
            return false;
        }
        if !self.targets.contains_key(&id) {
            tracing::trace!("select ignored for unknown target {}", id);
            return false;
        }
        let changed = self.selected != Some(id);
        self.selected = Some(id);
        if changed {
            tracing::debug!("selected target {}", id);
        }
        changed
    }

    // =========================================================================
    // Commits
    // =========================================================================

    /// Step the selected target for a threshold crossing
    ///
    /// Returns the target and its new value, or None without a selection.
    pub fn commit(&mut self, crossing: Crossing) -> Option<(TargetId, f32)> {
        let id = self.selected?;
        let direction = self.direction;
        let target = self.targets.get_mut(&id)?;
        let behavior = target.behavior;
        let next = direction.step(crossing, target.value, behavior.step, behavior.range);
        target.set_value(next);
        tracing::debug!("target {} committed {:?} -> {}", id, crossing, target.value);
        Some((id, target.value))
    }

    /// Step the selected target for a cumulative drag that reached its threshold
    ///
    /// A drag at or past `-scroll_distance_factor * multiplier` counts as a
    /// negative crossing, anything else as positive.
    pub fn commit_drag(&mut self, total_drag: f32, multiplier: f32) -> Option<(TargetId, f32)> {
        let threshold = self.selected()?.behavior.scroll_distance_factor * multiplier;
        let crossing = if total_drag <= -threshold {
            Crossing::Negative
        } else {
            Crossing::Positive
        };
        self.commit(crossing)
    }

    /// Run the selected target's commit callback with its current value
    pub fn trigger_commit_callback(&mut self) -> Option<(TargetId, f32)> {
        let id = self.selected?;
        let target = self.targets.get_mut(&id)?;
        Some((id, target.fire_commit()))
    }

    // =========================================================================
    // Editing
    // =========================================================================

    pub fn editing_id(&self) -> Option<TargetId> {
        self.edit.as_ref().map(EditSession::target)
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    /// Text of the open edit session
    pub fn edit_buffer(&self) -> Option<&str> {
        self.edit.as_ref().map(EditSession::buffer)
    }

    /// Replace the open session's text; ignored without a session
    pub fn set_edit_buffer(&mut self, text: impl Into<String>) {
        if let Some(session) = self.edit.as_mut() {
            session.set_buffer(text);
        }
    }

    /// Open an edit session seeded with `current_value`
    ///
    /// Ignored for unknown ids and while another session is open.
    pub fn start_edit(&mut self, id: TargetId, current_value: f32) -> Option<&EditSession> {
        if self.edit.is_some() || !self.targets.contains_key(&id) {
            return None;
        }
        let session = EditSession::new(id, current_value);
        tracing::debug!("editing target {} from {:?}", id, session.buffer());
        self.edit = Some(session);
        self.edit.as_ref()
    }

    /// Submit edit text for the open session
    ///
    /// Parsed input is clamped into the target's range, stored, and passed to
    /// the target's commit callback. Unparseable input keeps the previous
    /// value and runs no callback. Either way the session closes. Returns
    /// None when no session is open.
    pub fn commit_edit(&mut self, raw: &str) -> Option<(TargetId, EditOutcome)> {
        let session = self.edit.take()?;
        let id = session.target();
        let target = self.targets.get_mut(&id)?;
        let outcome = match parse_edit(raw) {
            Some(parsed) => {
                target.set_value(parsed);
                let value = target.fire_commit();
                tracing::debug!("target {} edited to {}", id, value);
                EditOutcome::Committed { value }
            }
            None => {
                tracing::debug!(
                    "edit of target {} rejected {:?}, keeping {}",
                    id,
                    raw,
                    target.value
                );
                EditOutcome::Rejected { kept: target.value }
            }
        };
        Some((id, outcome))
    }

    /// Submit the open session's own buffer
    pub fn commit_edit_buffer(&mut self) -> Option<(TargetId, EditOutcome)> {
        let raw = self.edit.as_ref()?.buffer().to_string();
        self.commit_edit(&raw)
    }

    /// Close the open session without touching any value
    pub fn cancel_edit(&mut self) -> Option<TargetId> {
        let session = self.edit.take()?;
        tracing::debug!("edit of target {} cancelled", session.target());
        Some(session.target())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numscroll_core::ValueRange;
    use std::sync::{Arc, Mutex};

    fn behavior(min: f32, max: f32, start: f32) -> TargetBehavior {
        TargetBehavior {
            start_value: start,
            range: ValueRange::new(min, max).unwrap(),
            ..Default::default()
        }
    }

    fn recorder() -> (Arc<Mutex<Vec<f32>>>, CommitCallback) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let clone = log.clone();
        (log, Box::new(move |v| clone.lock().unwrap().push(v)))
    }

    #[test]
    fn test_register_clamps_start_value() {
        let mut registry = TargetRegistry::new(IncrementDirection::Up);
        assert_eq!(registry.register(1, behavior(0.0, 10.0, 50.0), None), 10.0);
        assert_eq!(registry.value(1), Some(10.0));
    }

    #[test]
    fn test_reregister_resets_value() {
        let mut registry = TargetRegistry::new(IncrementDirection::Up);
        registry.register(1, behavior(0.0, 10.0, 2.0), None);
        registry.link_to(&[1]);
        registry.commit(Crossing::Negative);
        assert_eq!(registry.value(1), Some(3.0));

        registry.register(1, behavior(0.0, 10.0, 5.0), None);
        assert_eq!(registry.value(1), Some(5.0));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_link_picks_first_registered() {
        let mut registry = TargetRegistry::new(IncrementDirection::Up);
        registry.register(1, behavior(0.0, 100.0, 50.0), None);
        registry.register(2, behavior(-10.0, 10.0, -5.0), None);

        registry.link_to(&[9, 2, 1]);
        assert_eq!(registry.selected_id(), Some(2));

        registry.link_to(&[7, 8]);
        assert_eq!(registry.selected_id(), None);
    }

    #[test]
    fn test_select_ignores_unknown_ids() {
        let mut registry = TargetRegistry::new(IncrementDirection::Up);
        registry.register(1, TargetBehavior::default(), None);
        assert!(!registry.select(5));
        assert_eq!(registry.selected_id(), None);
        assert!(registry.select(1));
        assert!(!registry.select(1));
    }

    #[test]
    fn test_commit_without_selection_is_noop() {
        let mut registry = TargetRegistry::new(IncrementDirection::Up);
        registry.register(1, TargetBehavior::default(), None);
        assert_eq!(registry.commit(Crossing::Negative), None);
        assert_eq!(registry.trigger_commit_callback(), None);
        assert_eq!(registry.value(1), Some(0.0));
    }

    #[test]
    fn test_commit_drag_resolves_crossing() {
        let mut registry = TargetRegistry::new(IncrementDirection::Down);
        registry.register(1, TargetBehavior::default(), None);
        registry.select(1);
        assert_eq!(registry.commit_drag(-100.0, 1.0), Some((1, -1.0)));
        assert_eq!(registry.commit_drag(100.0, 1.0), Some((1, 0.0)));
        // Threshold scaled by the multiplier
        assert_eq!(registry.commit_drag(-20.0, 0.2), Some((1, -1.0)));
    }

    #[test]
    fn test_trigger_commit_callback() {
        let mut registry = TargetRegistry::new(IncrementDirection::Up);
        let (log, callback) = recorder();
        registry.register(3, behavior(0.0, 10.0, 4.0), Some(callback));
        registry.select(3);
        registry.commit(Crossing::Negative);
        assert_eq!(registry.trigger_commit_callback(), Some((3, 5.0)));
        assert_eq!(*log.lock().unwrap(), vec![5.0]);
    }

    #[test]
    fn test_edit_commit_and_reject() {
        let mut registry = TargetRegistry::new(IncrementDirection::Up);
        let (log, callback) = recorder();
        registry.register(1, behavior(0.0, 10.0, 6.0), Some(callback));

        let session = registry.start_edit(1, 6.0).unwrap();
        assert_eq!(session.buffer(), "6");
        assert_eq!(registry.editing_id(), Some(1));

        assert_eq!(
            registry.commit_edit("7.5"),
            Some((1, EditOutcome::Committed { value: 7.5 }))
        );
        assert_eq!(registry.value(1), Some(7.5));
        assert_eq!(registry.editing_id(), None);

        registry.start_edit(1, 7.5);
        assert_eq!(
            registry.commit_edit("abc"),
            Some((1, EditOutcome::Rejected { kept: 7.5 }))
        );
        assert_eq!(registry.value(1), Some(7.5));
        assert_eq!(*log.lock().unwrap(), vec![7.5]);
    }

    #[test]
    fn test_edit_is_clamped() {
        let mut registry = TargetRegistry::new(IncrementDirection::Up);
        registry.register(1, behavior(0.0, 10.0, 6.0), None);
        registry.start_edit(1, 6.0);
        assert_eq!(
            registry.commit_edit("42"),
            Some((1, EditOutcome::Committed { value: 10.0 }))
        );
    }

    #[test]
    fn test_single_edit_session() {
        let mut registry = TargetRegistry::new(IncrementDirection::Up);
        registry.register(1, TargetBehavior::default(), None);
        registry.register(2, TargetBehavior::default(), None);
        registry.select(1);

        assert!(registry.start_edit(1, 0.0).is_some());
        assert!(registry.start_edit(2, 0.0).is_none());
        assert_eq!(registry.editing_id(), Some(1));

        // Selection is frozen while editing
        assert!(!registry.select(2));
        assert_eq!(registry.selected_id(), Some(1));

        assert_eq!(registry.cancel_edit(), Some(1));
        assert!(registry.select(2));
        assert_eq!(registry.commit_edit("3"), None);
    }

    #[test]
    fn test_edit_buffer_submit() {
        let mut registry = TargetRegistry::new(IncrementDirection::Up);
        registry.register(1, TargetBehavior::default(), None);
        registry.start_edit(1, 0.0);
        registry.set_edit_buffer("-2.5");
        assert_eq!(registry.edit_buffer(), Some("-2.5"));
        assert_eq!(
            registry.commit_edit_buffer(),
            Some((1, EditOutcome::Committed { value: -2.5 }))
        );
    }
}
