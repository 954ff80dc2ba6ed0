//! Input events forwarded by the renderer
//!
//! Renderers either call the widget methods directly or build an [`Event`]
//! and hand it to the widget's `handle_event`.

/// Event type identifier
pub type EventType = u32;

/// Event types understood by the scrollers
pub mod event_types {
    use super::EventType;

    /// Pointer pressed on the scroller and started moving
    pub const DRAG_START: EventType = 1;
    /// Drag moved along the scroller's axis
    pub const DRAG: EventType = 2;
    /// Pointer released after a drag
    pub const DRAG_END: EventType = 3;
    /// Single tap on a target
    pub const TAP: EventType = 10;
    /// Double tap on a target
    pub const DOUBLE_TAP: EventType = 11;
    /// Edit field submitted
    pub const EDIT_SUBMIT: EventType = 20;
    /// Edit field dismissed without submitting
    pub const EDIT_CANCEL: EventType = 21;
    /// Frame clock tick
    pub const TICK: EventType = 30;
    /// Scroller box resized
    pub const RESIZE: EventType = 40;
}

/// A scroller input event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    /// Milliseconds on the renderer's clock
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    /// Drag movement along the active axis in pixels
    Drag { delta: f32 },
    /// Target a tap landed on
    Target { id: i32 },
    /// Submitted edit text
    Text { text: String },
    /// New scroller box size in pixels
    Resize { width: f32, height: f32 },
    None,
}

impl Event {
    pub fn drag_start(timestamp: u64) -> Self {
        Self {
            event_type: event_types::DRAG_START,
            data: EventData::None,
            timestamp,
        }
    }

    pub fn drag(delta: f32, timestamp: u64) -> Self {
        Self {
            event_type: event_types::DRAG,
            data: EventData::Drag { delta },
            timestamp,
        }
    }

    pub fn drag_end(timestamp: u64) -> Self {
        Self {
            event_type: event_types::DRAG_END,
            data: EventData::None,
            timestamp,
        }
    }

    pub fn tap(id: i32, timestamp: u64) -> Self {
        Self {
            event_type: event_types::TAP,
            data: EventData::Target { id },
            timestamp,
        }
    }

    pub fn double_tap(id: i32, timestamp: u64) -> Self {
        Self {
            event_type: event_types::DOUBLE_TAP,
            data: EventData::Target { id },
            timestamp,
        }
    }

    pub fn edit_submit(text: impl Into<String>, timestamp: u64) -> Self {
        Self {
            event_type: event_types::EDIT_SUBMIT,
            data: EventData::Text { text: text.into() },
            timestamp,
        }
    }

    pub fn edit_cancel(timestamp: u64) -> Self {
        Self {
            event_type: event_types::EDIT_CANCEL,
            data: EventData::None,
            timestamp,
        }
    }

    pub fn tick(timestamp: u64) -> Self {
        Self {
            event_type: event_types::TICK,
            data: EventData::None,
            timestamp,
        }
    }

    pub fn resize(width: f32, height: f32, timestamp: u64) -> Self {
        Self {
            event_type: event_types::RESIZE,
            data: EventData::Resize { width, height },
            timestamp,
        }
    }

    /// Drag delta carried by the event, 0 for anything else
    pub fn drag_delta(&self) -> f32 {
        match self.data {
            EventData::Drag { delta } => delta,
            _ => 0.0,
        }
    }

    /// Target id carried by the event
    pub fn target(&self) -> Option<i32> {
        match self.data {
            EventData::Target { id } => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_payloads() {
        let drag = Event::drag(-12.5, 40);
        assert_eq!(drag.event_type, event_types::DRAG);
        assert_eq!(drag.drag_delta(), -12.5);
        assert_eq!(drag.target(), None);

        let tap = Event::double_tap(3, 50);
        assert_eq!(tap.event_type, event_types::DOUBLE_TAP);
        assert_eq!(tap.target(), Some(3));
        assert_eq!(tap.drag_delta(), 0.0);
        assert_eq!(tap.timestamp, 50);
    }

    #[test]
    fn test_text_and_resize_payloads() {
        assert_eq!(
            Event::edit_submit("7.5", 0).data,
            EventData::Text {
                text: "7.5".to_string()
            }
        );
        assert_eq!(
            Event::resize(40.0, 100.0, 0).data,
            EventData::Resize {
                width: 40.0,
                height: 100.0
            }
        );
        assert_eq!(Event::tick(10).data, EventData::None);
    }
}
