//! Gesture state machine
//!
//! States are plain enums that map events to transitions through
//! [`StateTransitions`]. [`StateMachine`] holds the current state and a
//! short transition history for debugging.

use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

use crate::events::{event_types, EventType};

/// Number of transitions kept in a machine's history
const HISTORY_LEN: usize = 16;

/// State types that handle event transitions
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// Drag gesture lifecycle of a scroller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging,
}

impl StateTransitions for GestureState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use event_types::*;
        match (self, event) {
            (GestureState::Idle, DRAG_START) => Some(GestureState::Dragging),
            (GestureState::Dragging, DRAG_END) => Some(GestureState::Idle),
            _ => None,
        }
    }
}

impl GestureState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, GestureState::Dragging)
    }
}

/// A state machine instance
#[derive(Debug, Clone)]
pub struct StateMachine<S: StateTransitions> {
    current_state: S,
    /// Most recent transitions, oldest first
    history: SmallVec<[(S, EventType, S); HISTORY_LEN]>,
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: StateTransitions> StateMachine<S> {
    pub fn new(initial_state: S) -> Self {
        Self {
            current_state: initial_state,
            history: SmallVec::new(),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: EventType) -> bool {
        self.current_state.on_event(event).is_some()
    }

    /// Send an event, returning the new state if a transition happened
    pub fn send(&mut self, event: EventType) -> Option<S> {
        let from = self.current_state;
        let to = from.on_event(event)?;
        self.current_state = to;
        if self.history.len() == HISTORY_LEN {
            self.history.remove(0);
        }
        self.history.push((from, event, to));
        tracing::trace!("fsm {:?} --{}--> {:?}", from, event, to);
        Some(to)
    }

    /// Get transition history
    pub fn history(&self) -> &[(S, EventType, S)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
