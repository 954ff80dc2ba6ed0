//! Detached number scroller
//!
//! One scroller surface driving any number of registered targets. Taps
//! select the target the drag applies to; double taps open a text edit on
//! targets that allow it. Targets may step automatically while the
//! free-drag indicator is held near an edge: the renderer drives that repeat
//! timer by calling [`DetachedScroller::tick`] with the current time.
//!
//! # Example
//!
//! ```rust
//! use numscroll_core::{DetachedScrollerConfig, TargetBehavior, ValueRange};
//! use numscroll_widgets::DetachedScroller;
//!
//! let mut scroller = DetachedScroller::new(DetachedScrollerConfig::default()).unwrap();
//! let hours = TargetBehavior {
//!     range: ValueRange::new(0.0, 23.0).unwrap(),
//!     start_value: 12.0,
//!     ..Default::default()
//! };
//! scroller.register_target(1, Some(hours), None).unwrap();
//! scroller.on_tap(1);
//!
//! scroller.on_drag_start_at(0);
//! scroller.on_drag_delta(-100.0, 16);
//! scroller.on_drag_end();
//! assert_eq!(scroller.value(1), Some(13.0));
//! ```

use numscroll_animation::{TimerId, TimerScheduler};
use numscroll_core::events::event_types;
use numscroll_core::{
    Crossing, DetachedScrollerConfig, DragAccumulator, Event, EventData, GestureState,
    IndicatorMode, IndicatorPositioner, Result, StateMachine, TargetBehavior,
};

use crate::edit::EditOutcome;
use crate::observer::{Listeners, ScrollerEvent};
use crate::registry::TargetRegistry;
use crate::scroller::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::target::{CommitCallback, TargetId};

/// A scroller surface shared by several targets
pub struct DetachedScroller {
    config: DetachedScrollerConfig,
    default_behavior: TargetBehavior,
    registry: TargetRegistry,
    drag: DragAccumulator,
    indicator: IndicatorPositioner,
    gesture: StateMachine<GestureState>,
    timers: TimerScheduler,
    far_scroll_timer: Option<TimerId>,
    clock_ms: u64,
    width: f32,
    height: f32,
    listeners: Listeners,
}

impl DetachedScroller {
    /// Create a scroller with no targets
    pub fn new(config: DetachedScrollerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            default_behavior: TargetBehavior::default(),
            registry: TargetRegistry::new(config.direction),
            drag: DragAccumulator::new(),
            indicator: IndicatorPositioner::new(
                IndicatorMode::from_sync_flag(config.sync_indicator_with_value),
                config.line_speed,
            ),
            gesture: StateMachine::default(),
            timers: TimerScheduler::new(),
            far_scroll_timer: None,
            clock_ms: 0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            listeners: Listeners::new(),
        })
    }

    /// Behavior used for targets registered without one
    pub fn with_default_behavior(mut self, behavior: TargetBehavior) -> Result<Self> {
        self.config.check_target(&behavior)?;
        self.default_behavior = behavior;
        Ok(self)
    }

    /// Register a change listener
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&ScrollerEvent) + Send + 'static,
    {
        self.listeners.subscribe(listener);
    }

    pub fn config(&self) -> &DetachedScrollerConfig {
        &self.config
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    // =========================================================================
    // Targets
    // =========================================================================

    /// Register a target and return its initial value
    ///
    /// Registering an existing id replaces that target.
    pub fn register_target(
        &mut self,
        id: TargetId,
        behavior: Option<TargetBehavior>,
        on_commit: Option<CommitCallback>,
    ) -> Result<f32> {
        let behavior = behavior.unwrap_or(self.default_behavior);
        self.config.check_target(&behavior)?;

        let value = self.registry.register(id, behavior, on_commit);
        self.listeners.notify(&ScrollerEvent::ValueChanged {
            target: Some(id),
            value,
        });
        if self.registry.selected_id() == Some(id) {
            self.sync_indicator();
            if self.is_dragging() {
                self.arm_far_scroll_timer();
            }
        }
        Ok(value)
    }

    /// Select the first registered id of `ids`
    pub fn link_to(&mut self, ids: &[TargetId]) {
        let before = self.registry.selected_id();
        self.registry.link_to(ids);
        self.selection_changed(before);
    }

    pub fn value(&self, id: TargetId) -> Option<f32> {
        self.registry.value(id)
    }

    /// Display text for a target's value
    pub fn formatted(&self, id: TargetId) -> Option<String> {
        self.registry.get(id).map(|target| target.formatted())
    }

    pub fn selected_id(&self) -> Option<TargetId> {
        self.registry.selected_id()
    }

    /// Value of the selected target
    pub fn selected_value(&self) -> Option<f32> {
        self.registry.selected().map(|target| target.value())
    }

    pub fn editing_id(&self) -> Option<TargetId> {
        self.registry.editing_id()
    }

    pub fn edit_buffer(&self) -> Option<&str> {
        self.registry.edit_buffer()
    }

    /// Replace the text of the open edit session as the user types
    pub fn set_edit_buffer(&mut self, text: impl Into<String>) {
        self.registry.set_edit_buffer(text);
    }

    pub fn indicator_offset(&self) -> f32 {
        self.indicator.offset()
    }

    /// Drag distance not yet committed
    pub fn cumulative_drag(&self) -> f32 {
        self.drag.cumulative()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.current_state().is_dragging()
    }

    /// Whether the far-scroll repeat timer is running
    pub fn is_auto_incrementing(&self) -> bool {
        self.far_scroll_timer.is_some_and(|id| self.timers.is_active(id))
    }

    /// Update the scroller's box size
    pub fn set_dimensions(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.sync_indicator();
    }

    /// Pixel span along the drag axis
    pub fn extent(&self) -> f32 {
        self.config.orientation.extent(self.width, self.height)
    }

    // =========================================================================
    // Taps and editing
    // =========================================================================

    /// Select the tapped target; returns whether the selection changed
    ///
    /// Ignored for unknown ids and while an edit is open.
    pub fn on_tap(&mut self, id: TargetId) -> bool {
        let before = self.registry.selected_id();
        if !self.registry.select(id) {
            return false;
        }
        self.selection_changed(before);
        if self.is_dragging() {
            self.arm_far_scroll_timer();
        }
        true
    }

    /// Open a text edit on the tapped target
    ///
    /// Honored only for targets with `double_tap_to_edit` and while no other
    /// edit is open. The tapped target becomes selected.
    pub fn on_double_tap(&mut self, id: TargetId) -> bool {
        let Some(target) = self.registry.get(id) else {
            return false;
        };
        if !target.behavior().double_tap_to_edit || self.registry.is_editing() {
            return false;
        }
        let value = target.value();

        let before = self.registry.selected_id();
        self.registry.select(id);
        self.selection_changed(before);
        self.cancel_far_scroll_timer();

        let Some(session) = self.registry.start_edit(id, value) else {
            return false;
        };
        let text = session.buffer().to_string();
        self.listeners.notify(&ScrollerEvent::EditStarted { target: id, text });
        true
    }

    /// Submit edit text for the open session
    ///
    /// Returns None when no session is open.
    pub fn on_edit_submit(&mut self, text: &str) -> Option<EditOutcome> {
        let (id, outcome) = self.registry.commit_edit(text)?;
        if let EditOutcome::Committed { value } = outcome {
            self.listeners.notify(&ScrollerEvent::ValueChanged {
                target: Some(id),
                value,
            });
            self.listeners.notify(&ScrollerEvent::Committed {
                target: Some(id),
                value,
            });
            if self.registry.selected_id() == Some(id) {
                self.sync_indicator();
            }
        }
        self.listeners.notify(&ScrollerEvent::EditFinished { target: id, outcome });
        Some(outcome)
    }

    /// Submit the open session's current text
    pub fn submit_edit_buffer(&mut self) -> Option<EditOutcome> {
        let text = self.registry.edit_buffer()?.to_string();
        self.on_edit_submit(&text)
    }

    /// Close the open edit session without changing any value
    pub fn on_edit_cancel(&mut self) -> bool {
        let Some(id) = self.registry.cancel_edit() else {
            return false;
        };
        self.listeners.notify(&ScrollerEvent::EditFinished {
            target: id,
            outcome: EditOutcome::Cancelled,
        });
        true
    }

    // =========================================================================
    // Drag gesture
    // =========================================================================

    /// Start a drag at the last known time
    pub fn on_drag_start(&mut self) -> bool {
        self.on_drag_start_at(self.clock_ms)
    }

    /// Start a drag at `now_ms`
    ///
    /// Ignored while an edit is open. Starts the far-scroll timer when the
    /// selected target auto-increments.
    pub fn on_drag_start_at(&mut self, now_ms: u64) -> bool {
        if self.registry.is_editing() {
            tracing::trace!("drag start ignored while editing");
            return false;
        }
        self.advance_clock(now_ms);
        if self.gesture.send(event_types::DRAG_START).is_none() {
            return false;
        }
        self.drag.begin_gesture();
        self.arm_far_scroll_timer();
        true
    }

    /// Feed one drag delta to the selected target
    ///
    /// Returns the target and its new value when the delta committed a step.
    /// Deltas outside a gesture, during an edit, or with nothing selected are
    /// ignored.
    pub fn on_drag_delta(&mut self, delta: f32, timestamp_ms: u64) -> Option<(TargetId, f32)> {
        if !self.is_dragging() || self.registry.is_editing() {
            return None;
        }
        if !delta.is_finite() {
            tracing::debug!("ignoring non-finite drag delta {}", delta);
            return None;
        }
        self.advance_clock(timestamp_ms);
        let behavior = *self.registry.selected()?.behavior();

        let multiplier = if behavior.use_dynamic_distance_factor {
            self.drag
                .sample_velocity(delta, timestamp_ms, behavior.dynamic_scaling_factor)
        } else {
            1.0
        };
        self.drag.accumulate(delta);
        let committed = self
            .drag
            .take_crossing(behavior.scroll_distance_factor, multiplier)
            .and_then(|crossing| self.commit_step(crossing));

        match self.indicator.mode() {
            IndicatorMode::Sync => self.sync_indicator(),
            IndicatorMode::FreeDrag => {
                let before = self.indicator.offset();
                let offset = self.indicator.follow_drag(delta, self.extent());
                self.notify_indicator(before, offset);
            }
        }
        committed
    }

    /// End the drag gesture
    ///
    /// Stops auto-increment, recenters a free-drag indicator and runs the
    /// selected target's commit callback. Returns the committed target and
    /// value.
    pub fn on_drag_end(&mut self) -> Option<(TargetId, f32)> {
        self.gesture.send(event_types::DRAG_END)?;
        self.cancel_far_scroll_timer();

        let before = self.indicator.offset();
        self.indicator.release();
        self.notify_indicator(before, self.indicator.offset());

        let (id, value) = self.registry.trigger_commit_callback()?;
        tracing::debug!("target {} committed {} at drag end", id, value);
        self.listeners.notify(&ScrollerEvent::Committed {
            target: Some(id),
            value,
        });
        Some((id, value))
    }

    /// Advance the clock and run due auto-increment steps
    ///
    /// Each elapsed timer period steps the selected target once, away from
    /// center, while the indicator is past the far-scroll threshold. Returns
    /// the number of steps taken.
    pub fn tick(&mut self, now_ms: u64) -> u32 {
        self.advance_clock(now_ms);
        let fired = self.timers.tick(self.clock_ms);
        let Some(timer) = self.far_scroll_timer else {
            return 0;
        };

        let periods: u32 = fired
            .iter()
            .filter(|(id, _)| *id == timer)
            .map(|(_, count)| *count)
            .sum();
        let mut steps = 0;
        for _ in 0..periods {
            if !self.is_far() {
                continue;
            }
            let crossing = Crossing::from_sign(self.indicator.offset());
            if self.commit_step(crossing).is_some() {
                steps += 1;
            }
        }
        if steps > 0 {
            tracing::trace!("auto-increment took {} steps at {}ms", steps, now_ms);
        }
        steps
    }

    /// Dispatch a typed input event; returns whether it was handled
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let ts = event.timestamp;
        match (event.event_type, &event.data) {
            (event_types::DRAG_START, _) => self.on_drag_start_at(ts),
            (event_types::DRAG, EventData::Drag { delta }) => {
                self.on_drag_delta(*delta, ts);
                true
            }
            (event_types::DRAG_END, _) => {
                self.on_drag_end();
                true
            }
            (event_types::TAP, EventData::Target { id }) => self.on_tap(*id),
            (event_types::DOUBLE_TAP, EventData::Target { id }) => self.on_double_tap(*id),
            (event_types::EDIT_SUBMIT, EventData::Text { text }) => {
                self.on_edit_submit(text).is_some()
            }
            (event_types::EDIT_CANCEL, _) => self.on_edit_cancel(),
            (event_types::TICK, _) => {
                self.tick(ts);
                true
            }
            (event_types::RESIZE, EventData::Resize { width, height }) => {
                self.set_dimensions(*width, *height);
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn advance_clock(&mut self, now_ms: u64) {
        self.clock_ms = self.clock_ms.max(now_ms);
    }

    /// Step the selected target and report the change
    fn commit_step(&mut self, crossing: Crossing) -> Option<(TargetId, f32)> {
        let before = self.registry.selected()?.value();
        let (id, value) = self.registry.commit(crossing)?;
        if value != before {
            self.listeners.notify(&ScrollerEvent::ValueChanged {
                target: Some(id),
                value,
            });
        }
        Some((id, value))
    }

    fn is_far(&self) -> bool {
        match self.registry.selected() {
            Some(target) => self
                .indicator
                .is_far(target.behavior().far_scroll_threshold, self.extent()),
            None => false,
        }
    }

    /// (Re)start the far-scroll timer for the selected target
    fn arm_far_scroll_timer(&mut self) {
        self.cancel_far_scroll_timer();
        let Some(target) = self.registry.selected() else {
            return;
        };
        let behavior = target.behavior();
        if behavior.auto_increment_on_far_scroll {
            let period = behavior.auto_increment_delay_ms;
            self.far_scroll_timer = Some(self.timers.start(period, self.clock_ms));
        }
    }

    fn cancel_far_scroll_timer(&mut self) {
        if let Some(id) = self.far_scroll_timer.take() {
            self.timers.cancel(id);
        }
    }

    fn selection_changed(&mut self, before: Option<TargetId>) {
        let target = self.registry.selected_id();
        if target != before {
            self.listeners.notify(&ScrollerEvent::SelectionChanged { target });
            self.sync_indicator();
        }
    }

    fn sync_indicator(&mut self) {
        let Some(target) = self.registry.selected() else {
            return;
        };
        let (value, range) = (target.value(), target.behavior().range);
        let before = self.indicator.offset();
        let extent = self.extent();
        let offset = self
            .indicator
            .sync_to_value(value, range, extent, self.config.direction);
        self.notify_indicator(before, offset);
    }

    fn notify_indicator(&mut self, before: f32, offset: f32) {
        if before != offset {
            self.listeners.notify(&ScrollerEvent::IndicatorMoved { offset });
        }
    }
}

impl Drop for DetachedScroller {
    fn drop(&mut self) {
        self.timers.cancel_all();
    }
}

impl std::fmt::Debug for DetachedScroller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetachedScroller")
            .field("targets", &self.registry.len())
            .field("selected", &self.registry.selected_id())
            .field("editing", &self.registry.editing_id())
            .field("indicator_offset", &self.indicator.offset())
            .field("state", &self.gesture.current_state())
            .finish()
    }
}
