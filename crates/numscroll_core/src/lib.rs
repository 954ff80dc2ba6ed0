//! numscroll core
//!
//! The gesture-to-value logic behind drag-controlled number scrollers:
//!
//! - **Formatting**: step-aware display text for values
//! - **Ranges**: inclusive clamping applied on every mutation
//! - **Drag accumulation**: threshold crossing with velocity-scaled thresholds
//! - **Indicator positioning**: value-synced or free-drag indicator offsets
//! - **Gesture state**: the `Idle -> Dragging -> Idle` state machine
//!
//! Nothing here draws; a renderer forwards input and reads results back.
//!
//! # Example
//!
//! ```rust
//! use numscroll_core::{Crossing, DragAccumulator, IncrementDirection, ValueRange};
//!
//! let range = ValueRange::new(-10.0, 10.0).unwrap();
//! let mut drag = DragAccumulator::new();
//! let mut value = 0.0;
//!
//! for delta in [-40.0, -40.0, -30.0] {
//!     drag.accumulate(delta);
//!     if let Some(crossing) = drag.take_crossing(100.0, 1.0) {
//!         value = IncrementDirection::Up.step(crossing, value, 1.0, range);
//!     }
//! }
//!
//! assert_eq!(value, 1.0);
//! assert_eq!(drag.cumulative(), -10.0);
//! assert_eq!(Crossing::from_sign(drag.cumulative()), Crossing::Negative);
//! ```

pub mod config;
pub mod direction;
pub mod drag;
pub mod error;
pub mod events;
pub mod format;
pub mod fsm;
pub mod indicator;
pub mod range;

pub use config::{DetachedScrollerConfig, ScrollerConfig, TargetBehavior};
pub use direction::{Crossing, IncrementDirection, Orientation};
pub use drag::{scroll_factor_multiplier, DragAccumulator};
pub use error::{ConfigError, Result};
pub use events::{Event, EventData, EventType};
pub use format::{decimal_places, edit_text, format_value};
pub use fsm::{GestureState, StateMachine, StateTransitions};
pub use indicator::{IndicatorMode, IndicatorPositioner};
pub use range::{clamp, ValueRange};
