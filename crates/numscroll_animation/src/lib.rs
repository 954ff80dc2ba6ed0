//! numscroll timing
//!
//! Cancellable repeat timers for auto-repeating scroller behavior.
//!
//! # Features
//!
//! - **Externally clocked**: timers advance only when ticked with a timestamp
//! - **Catch-up**: late ticks report every period that elapsed
//! - **Cancellable**: a cancelled timer never fires again

pub mod scheduler;
pub mod timer;

pub use scheduler::{Fired, TimerId, TimerScheduler};
pub use timer::RepeatTimer;
