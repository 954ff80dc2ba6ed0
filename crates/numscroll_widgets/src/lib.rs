//! numscroll widgets
//!
//! Drag-controlled number scrollers built on `numscroll_core`:
//!
//! - [`NumberScroller`]: one value, one scroller surface
//! - [`DetachedScroller`]: one surface driving many registered targets, with
//!   tap selection, double-tap text editing and far-scroll auto-increment
//!
//! Both are headless. The host forwards gesture input (directly or as
//! [`numscroll_core::Event`] values) and draws from the returned state or from
//! [`ScrollerEvent`] notifications.

pub mod detached;
pub mod edit;
pub mod observer;
pub mod registry;
pub mod scroller;
pub mod target;

pub use detached::DetachedScroller;
pub use edit::{parse_edit, EditOutcome, EditSession};
pub use observer::{Listener, Listeners, ScrollerEvent};
pub use registry::TargetRegistry;
pub use scroller::{NumberScroller, ScrollerState, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use target::{CommitCallback, Target, TargetId};

/// Commonly used items
pub mod prelude {
    pub use crate::{
        CommitCallback, DetachedScroller, EditOutcome, NumberScroller, ScrollerEvent, TargetId,
    };
    pub use numscroll_core::{
        DetachedScrollerConfig, IncrementDirection, Orientation, ScrollerConfig, TargetBehavior,
        ValueRange,
    };
}
