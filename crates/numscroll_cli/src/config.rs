//! Gesture script files
//!
//! A script describes one scroller, the targets registered on it and a
//! timestamped list of inputs to replay:
//!
//! ```toml
//! [scroller]
//! height = 100.0
//!
//! [scroller.detached]
//! sync_indicator_with_value = false
//!
//! [[targets]]
//! id = 1
//!
//! [targets.behavior]
//! step = 2.0
//! range = { min = 0.0, max = 100.0 }
//!
//! [[events]]
//! at = 0
//! kind = "tap"
//! id = 1
//! ```

use anyhow::{Context, Result};
use numscroll_core::{DetachedScrollerConfig, Event, ScrollerConfig, TargetBehavior};
use numscroll_widgets::{TargetId, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// A replayable gesture script
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Script {
    /// Free-form title shown in replay output
    #[serde(default)]
    pub name: Option<String>,
    pub scroller: ScrollerSection,
    /// Targets registered on a detached scroller, in order
    #[serde(default)]
    pub targets: Vec<TargetEntry>,
    /// Ids passed to `link_to` after registration
    #[serde(default)]
    pub link: Vec<TargetId>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

/// The scroller under test; exactly one of `single` or `detached` is set
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScrollerSection {
    /// Box width in pixels
    #[serde(default = "default_width")]
    pub width: f32,
    /// Box height in pixels
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default)]
    pub single: Option<ScrollerConfig>,
    #[serde(default)]
    pub detached: Option<DetachedScrollerConfig>,
    /// Behavior for targets registered without their own
    #[serde(default)]
    pub default_target: Option<TargetBehavior>,
}

fn default_width() -> f32 {
    DEFAULT_WIDTH
}

fn default_height() -> f32 {
    DEFAULT_HEIGHT
}

/// One target registration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TargetEntry {
    pub id: TargetId,
    #[serde(default)]
    pub behavior: Option<TargetBehavior>,
}

/// A timestamped input
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScriptEvent {
    /// Milliseconds since the start of the script
    #[serde(default)]
    pub at: u64,
    #[serde(flatten)]
    pub input: Input,
}

/// Input forwarded to the scroller
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Input {
    DragStart,
    Drag { delta: f32 },
    DragEnd,
    Tap { id: TargetId },
    DoubleTap { id: TargetId },
    EditSubmit { text: String },
    EditCancel,
    Tick,
    Resize { width: f32, height: f32 },
}

impl ScriptEvent {
    /// Convert to the typed event the widgets consume
    pub fn to_event(&self) -> Event {
        let at = self.at;
        match &self.input {
            Input::DragStart => Event::drag_start(at),
            Input::Drag { delta } => Event::drag(*delta, at),
            Input::DragEnd => Event::drag_end(at),
            Input::Tap { id } => Event::tap(*id, at),
            Input::DoubleTap { id } => Event::double_tap(*id, at),
            Input::EditSubmit { text } => Event::edit_submit(text.clone(), at),
            Input::EditCancel => Event::edit_cancel(at),
            Input::Tick => Event::tick(at),
            Input::Resize { width, height } => Event::resize(*width, *height, at),
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::DragStart => write!(f, "drag_start"),
            Input::Drag { delta } => write!(f, "drag {}", delta),
            Input::DragEnd => write!(f, "drag_end"),
            Input::Tap { id } => write!(f, "tap {}", id),
            Input::DoubleTap { id } => write!(f, "double_tap {}", id),
            Input::EditSubmit { text } => write!(f, "edit_submit {:?}", text),
            Input::EditCancel => write!(f, "edit_cancel"),
            Input::Tick => write!(f, "tick"),
            Input::Resize { width, height } => write!(f, "resize {}x{}", width, height),
        }
    }
}

impl Script {
    /// Load a script from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            anyhow::bail!(
                "No script found at {}. Run `numscroll new` to create one.",
                path.display()
            );
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse a script from TOML text
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Title for replay output
    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or("untitled script")
    }
}
