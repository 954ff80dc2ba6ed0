//! Change notifications for renderers
//!
//! Widgets report every observable change as a [`ScrollerEvent`] so a
//! renderer can redraw only what changed instead of polling.

use smallvec::SmallVec;

use crate::edit::EditOutcome;
use crate::target::TargetId;

/// An observable change in a scroller
#[derive(Clone, Debug, PartialEq)]
pub enum ScrollerEvent {
    /// A value changed; `target` is None for single-value scrollers
    ValueChanged {
        target: Option<TargetId>,
        value: f32,
    },
    /// The indicator moved to a new offset
    IndicatorMoved { offset: f32 },
    /// A gesture or edit finished and the commit callback ran
    Committed {
        target: Option<TargetId>,
        value: f32,
    },
    /// The selected target changed
    SelectionChanged { target: Option<TargetId> },
    /// An edit session opened with the given seed text
    EditStarted { target: TargetId, text: String },
    /// An edit session closed
    EditFinished {
        target: TargetId,
        outcome: EditOutcome,
    },
}

/// Change listener function type
pub type Listener = Box<dyn FnMut(&ScrollerEvent) + Send>;

/// Registered change listeners of one widget
#[derive(Default)]
pub struct Listeners {
    listeners: SmallVec<[Listener; 2]>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every future change
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&ScrollerEvent) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Deliver a change to all listeners in registration order
    pub fn notify(&mut self, event: &ScrollerEvent) {
        for listener in self.listeners.iter_mut() {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}
