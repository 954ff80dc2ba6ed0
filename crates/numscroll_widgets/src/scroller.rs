//! Single-value number scroller
//!
//! Turns a stream of drag deltas into step-wise value changes and an
//! indicator offset. Rendering is left to the host: it forwards drag input
//! and the scroller's box size, then reads [`NumberScroller::state`] back or
//! subscribes to change notifications.
//!
//! # Example
//!
//! ```rust
//! use numscroll_core::ScrollerConfig;
//! use numscroll_widgets::NumberScroller;
//!
//! let mut scroller = NumberScroller::new(ScrollerConfig::default()).unwrap();
//! scroller.on_drag_start();
//! for (t, delta) in [(0, -40.0), (16, -40.0), (32, -30.0)] {
//!     scroller.on_drag_delta(delta, t);
//! }
//! assert_eq!(scroller.on_drag_end(), Some(1.0));
//! assert_eq!(scroller.formatted(), "1");
//! ```

use numscroll_core::events::event_types;
use numscroll_core::{
    format_value, Crossing, DragAccumulator, Event, EventData, GestureState, IndicatorMode,
    IndicatorPositioner, Result, ScrollerConfig, StateMachine,
};

use crate::observer::{Listeners, ScrollerEvent};
use crate::target::CommitCallback;

/// Default scroller box width in pixels
pub const DEFAULT_WIDTH: f32 = 40.0;

/// Default scroller box height in pixels
pub const DEFAULT_HEIGHT: f32 = 60.0;

/// Snapshot of what a renderer draws
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollerState {
    pub value: f32,
    pub indicator_offset: f32,
    pub cumulative_drag: f32,
}

/// A drag-controlled scroller over one value
pub struct NumberScroller {
    config: ScrollerConfig,
    value: f32,
    drag: DragAccumulator,
    indicator: IndicatorPositioner,
    gesture: StateMachine<GestureState>,
    width: f32,
    height: f32,
    on_commit: Option<CommitCallback>,
    listeners: Listeners,
}

impl NumberScroller {
    /// Create a scroller, rejecting invalid configuration
    pub fn new(config: ScrollerConfig) -> Result<Self> {
        config.validate()?;
        let mode = IndicatorMode::from_sync_flag(config.sync_indicator_with_value);
        let mut scroller = Self {
            config,
            value: config.range.clamp(config.start_value),
            drag: DragAccumulator::new(),
            indicator: IndicatorPositioner::new(mode, config.line_speed),
            gesture: StateMachine::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            on_commit: None,
            listeners: Listeners::new(),
        };
        scroller.sync_indicator();
        Ok(scroller)
    }

    /// Set the callback run with the final value when a drag ends
    pub fn with_on_commit<F>(mut self, on_commit: F) -> Self
    where
        F: FnMut(f32) + Send + 'static,
    {
        self.on_commit = Some(Box::new(on_commit));
        self
    }

    /// Register a change listener
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&ScrollerEvent) + Send + 'static,
    {
        self.listeners.subscribe(listener);
    }

    pub fn config(&self) -> &ScrollerConfig {
        &self.config
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

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Display text for the current value
    pub fn formatted(&self) -> String {
        format_value(self.value, self.config.step)
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

    pub fn gesture(&self) -> &StateMachine<GestureState> {
        &self.gesture
    }

    pub fn state(&self) -> ScrollerState {
        ScrollerState {
            value: self.value,
            indicator_offset: self.indicator.offset(),
            cumulative_drag: self.drag.cumulative(),
        }
    }

    /// Set the value directly, clamped into range
    pub fn set_value(&mut self, value: f32) {
        self.store_value(value);
        self.sync_indicator();
    }

    // =========================================================================
    // Gesture input
    // =========================================================================

    /// Start a drag gesture
    pub fn on_drag_start(&mut self) {
        if self.gesture.send(event_types::DRAG_START).is_some() {
            self.drag.begin_gesture();
        }
    }

    /// Feed one drag delta, returning the crossing it committed, if any
    ///
    /// Deltas outside a gesture are ignored.
    pub fn on_drag_delta(&mut self, delta: f32, timestamp_ms: u64) -> Option<Crossing> {
        if !self.is_dragging() {
            tracing::trace!("drag delta {} at {}ms outside a gesture", delta, timestamp_ms);
            return None;
        }
        if !delta.is_finite() {
            tracing::debug!("ignoring non-finite drag delta {}", delta);
            return None;
        }

        self.drag.accumulate(delta);
        let crossing = self
            .drag
            .take_crossing(self.config.scroll_distance_factor, 1.0);
        if let Some(crossing) = crossing {
            let next = self.config.direction.step(
                crossing,
                self.value,
                self.config.step,
                self.config.range,
            );
            self.store_value(next);
        }

        match self.indicator.mode() {
            IndicatorMode::Sync => self.sync_indicator(),
            IndicatorMode::FreeDrag => {
                let before = self.indicator.offset();
                let offset = self.indicator.follow_drag(delta, self.extent());
                self.notify_indicator(before, offset);
            }
        }
        crossing
    }

    /// End the drag gesture and run the commit callback
    ///
    /// Returns the committed value, or None if no gesture was active.
    pub fn on_drag_end(&mut self) -> Option<f32> {
        self.gesture.send(event_types::DRAG_END)?;

        let before = self.indicator.offset();
        self.indicator.release();
        self.notify_indicator(before, self.indicator.offset());

        if let Some(on_commit) = self.on_commit.as_mut() {
            on_commit(self.value);
        }
        tracing::debug!("scroller committed {}", self.value);
        self.listeners.notify(&ScrollerEvent::Committed {
            target: None,
            value: self.value,
        });
        Some(self.value)
    }

    /// Dispatch a typed input event; returns whether it applies to this scroller
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match (event.event_type, &event.data) {
            (event_types::DRAG_START, _) => self.on_drag_start(),
            (event_types::DRAG, EventData::Drag { delta }) => {
                self.on_drag_delta(*delta, event.timestamp);
            }
            (event_types::DRAG_END, _) => {
                self.on_drag_end();
            }
            (event_types::RESIZE, EventData::Resize { width, height }) => {
                self.set_dimensions(*width, *height)
            }
            _ => return false,
        }
        true
    }

    fn store_value(&mut self, value: f32) {
        let clamped = self.config.range.clamp(value);
        if clamped != self.value {
            self.value = clamped;
            self.listeners.notify(&ScrollerEvent::ValueChanged {
                target: None,
                value: clamped,
            });
        }
    }

    fn sync_indicator(&mut self) {
        let before = self.indicator.offset();
        let extent = self.extent();
        let offset = self.indicator.sync_to_value(
            self.value,
            self.config.range,
            extent,
            self.config.direction,
        );
        self.notify_indicator(before, offset);
    }

    fn notify_indicator(&mut self, before: f32, offset: f32) {
        if before != offset {
            self.listeners.notify(&ScrollerEvent::IndicatorMoved { offset });
        }
    }
}

impl std::fmt::Debug for NumberScroller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumberScroller")
            .field("value", &self.value)
            .field("indicator_offset", &self.indicator.offset())
            .field("cumulative_drag", &self.drag.cumulative())
            .field("state", &self.gesture.current_state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numscroll_core::{IncrementDirection, ValueRange};
    use std::sync::{Arc, Mutex};

    fn drag(scroller: &mut NumberScroller, deltas: &[f32]) {
        scroller.on_drag_start();
        for (i, delta) in deltas.iter().enumerate() {
            scroller.on_drag_delta(*delta, i as u64 * 16);
        }
    }

    #[test]
    fn test_drag_commits_one_step() {
        let mut scroller = NumberScroller::new(ScrollerConfig::default()).unwrap();
        drag(&mut scroller, &[-40.0, -40.0, -30.0]);
        let state = scroller.state();
        assert_eq!(state.value, 1.0);
        assert_eq!(state.cumulative_drag, -10.0);
    }

    #[test]
    fn test_non_finite_delta_keeps_scroller_usable() {
        let mut scroller = NumberScroller::new(ScrollerConfig::default()).unwrap();
        drag(&mut scroller, &[f32::NEG_INFINITY, f32::NAN, f32::INFINITY]);
        assert_eq!(scroller.value(), 0.0);
        assert_eq!(scroller.cumulative_drag(), 0.0);

        for (i, delta) in [-100.0, -100.0, -100.0].into_iter().enumerate() {
            assert_eq!(
                scroller.on_drag_delta(delta, 100 + i as u64 * 16),
                Some(Crossing::Negative)
            );
        }
        assert_eq!(scroller.value(), 3.0);
        assert!(scroller.indicator_offset().is_finite());
    }

    #[test]
    fn test_value_stops_at_max() {
        let config = ScrollerConfig {
            start_value: 10.0,
            ..Default::default()
        };
        let mut scroller = NumberScroller::new(config).unwrap();
        drag(&mut scroller, &[-150.0, -150.0]);
        assert_eq!(scroller.value(), 10.0);
    }

    #[test]
    fn test_threshold_boundary() {
        let mut scroller = NumberScroller::new(ScrollerConfig::default()).unwrap();
        scroller.on_drag_start();
        assert_eq!(scroller.on_drag_delta(-99.999, 0), None);
        assert_eq!(scroller.value(), 0.0);

        let mut scroller = NumberScroller::new(ScrollerConfig::default()).unwrap();
        scroller.on_drag_start();
        assert_eq!(scroller.on_drag_delta(-100.0, 0), Some(Crossing::Negative));
        assert_eq!(scroller.value(), 1.0);
        assert_eq!(scroller.cumulative_drag(), 0.0);
    }

    #[test]
    fn test_direction_table() {
        let cases = [
            (IncrementDirection::Up, -100.0, 1.0),
            (IncrementDirection::Up, 100.0, -1.0),
            (IncrementDirection::Left, -100.0, 1.0),
            (IncrementDirection::Left, 100.0, -1.0),
            (IncrementDirection::Down, -100.0, -1.0),
            (IncrementDirection::Down, 100.0, 1.0),
            (IncrementDirection::Right, -100.0, -1.0),
            (IncrementDirection::Right, 100.0, 1.0),
        ];
        for (direction, delta, expected) in cases {
            let mut scroller =
                NumberScroller::new(ScrollerConfig::with_direction(direction)).unwrap();
            drag(&mut scroller, &[delta]);
            assert_eq!(scroller.value(), expected, "{direction} with {delta}");
        }
    }

    #[test]
    fn test_deltas_outside_gesture_ignored() {
        let mut scroller = NumberScroller::new(ScrollerConfig::default()).unwrap();
        assert_eq!(scroller.on_drag_delta(-500.0, 0), None);
        assert_eq!(scroller.value(), 0.0);
        assert_eq!(scroller.cumulative_drag(), 0.0);
        assert_eq!(scroller.on_drag_end(), None);
    }

    #[test]
    fn test_sync_indicator_tracks_value() {
        let config = ScrollerConfig {
            range: ValueRange::new(0.0, 10.0).unwrap(),
            ..Default::default()
        };
        let mut scroller = NumberScroller::new(config).unwrap();
        scroller.set_dimensions(40.0, 100.0);
        // Minimum sits at the bottom edge for an upward scroller
        assert_eq!(scroller.indicator_offset(), 50.0);

        scroller.set_value(10.0);
        assert_eq!(scroller.indicator_offset(), -50.0);

        scroller.set_value(5.0);
        assert_eq!(scroller.indicator_offset(), 0.0);
    }

    #[test]
    fn test_free_indicator_snaps_back() {
        let mut scroller = NumberScroller::new(ScrollerConfig::free_indicator()).unwrap();
        scroller.on_drag_start();
        scroller.on_drag_delta(-16.0, 0);
        assert_eq!(scroller.indicator_offset(), -3.0);

        // Clamped to half the 60px default height
        scroller.on_drag_delta(-400.0, 16);
        assert_eq!(scroller.indicator_offset(), -30.0);

        scroller.on_drag_end();
        assert_eq!(scroller.indicator_offset(), 0.0);
    }

    #[test]
    fn test_on_commit_runs_at_drag_end() {
        let committed = Arc::new(Mutex::new(Vec::new()));
        let log = committed.clone();
        let mut scroller = NumberScroller::new(ScrollerConfig::default())
            .unwrap()
            .with_on_commit(move |v| log.lock().unwrap().push(v));

        drag(&mut scroller, &[-100.0, -100.0]);
        assert!(committed.lock().unwrap().is_empty());
        assert_eq!(scroller.on_drag_end(), Some(2.0));
        assert_eq!(*committed.lock().unwrap(), vec![2.0]);
    }

    #[test]
    fn test_listeners_see_changes() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let log = events.clone();
        let mut scroller = NumberScroller::new(ScrollerConfig::default()).unwrap();
        scroller.subscribe(move |event| log.lock().unwrap().push(event.clone()));

        drag(&mut scroller, &[-100.0]);
        scroller.on_drag_end();

        let events = events.lock().unwrap();
        assert_eq!(
            events[0],
            ScrollerEvent::ValueChanged {
                target: None,
                value: 1.0
            }
        );
        assert!(matches!(events[1], ScrollerEvent::IndicatorMoved { .. }));
        assert_eq!(
            events.last(),
            Some(&ScrollerEvent::Committed {
                target: None,
                value: 1.0
            })
        );
    }

    #[test]
    fn test_handle_event() {
        let mut scroller = NumberScroller::new(ScrollerConfig::default()).unwrap();
        assert!(scroller.handle_event(&Event::drag_start(0)));
        assert!(scroller.handle_event(&Event::drag(-100.0, 16)));
        assert!(scroller.handle_event(&Event::drag_end(32)));
        assert!(!scroller.handle_event(&Event::tap(1, 48)));
        assert_eq!(scroller.value(), 1.0);
        assert!(!scroller.is_dragging());
        assert_eq!(scroller.gesture().history().len(), 2);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ScrollerConfig {
            step: 0.0,
            ..Default::default()
        };
        assert!(NumberScroller::new(config).is_err());
    }
}
