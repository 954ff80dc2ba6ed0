//! Timer scheduler
//!
//! Owns every live repeat timer of a widget and reports which of them fired
//! on each tick.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::timer::RepeatTimer;

new_key_type! {
    /// Handle to a timer owned by a [`TimerScheduler`]
    pub struct TimerId;
}

/// Timers that fired during one tick, with their fire counts
pub type Fired = SmallVec<[(TimerId, u32); 4]>;

/// The scheduler that ticks all active timers
pub struct TimerScheduler {
    timers: SlotMap<TimerId, RepeatTimer>,
    last_tick_ms: Option<u64>,
}

impl TimerScheduler {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            last_tick_ms: None,
        }
    }

    /// Start a repeat timer at `now_ms`
    pub fn start(&mut self, period_ms: u64, now_ms: u64) -> TimerId {
        let id = self.timers.insert(RepeatTimer::start(period_ms, now_ms));
        tracing::trace!("timer {:?} started, period {}ms", id, period_ms);
        id
    }

    /// Cancel and drop a timer; returns false if it was already gone
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.timers.remove(id) {
            Some(mut timer) => {
                timer.cancel();
                tracing::trace!("timer {:?} cancelled after {} fires", id, timer.fired());
                true
            }
            None => false,
        }
    }

    /// Cancel every timer
    pub fn cancel_all(&mut self) {
        if !self.timers.is_empty() {
            tracing::trace!("cancelling {} timers", self.timers.len());
        }
        self.timers.clear();
    }

    pub fn get(&self, id: TimerId) -> Option<&RepeatTimer> {
        self.timers.get(id)
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Advance all timers to `now_ms`
    pub fn tick(&mut self, now_ms: u64) -> Fired {
        self.last_tick_ms = Some(now_ms);
        self.timers
            .iter_mut()
            .filter_map(|(id, timer)| {
                let count = timer.poll(now_ms);
                (count > 0).then_some((id, count))
            })
            .collect()
    }

    /// Time passed to the most recent tick
    pub fn last_tick_ms(&self) -> Option<u64> {
        self.last_tick_ms
    }

    /// Check if any timers are still running
    pub fn has_active_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl Default for TimerScheduler {
    fn default() -> Self {
        Self::new()
    }
}
