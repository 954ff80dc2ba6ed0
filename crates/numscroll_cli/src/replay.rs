//! Script replay
//!
//! Builds the scroller a [`Script`] describes, feeds it every input in order
//! and records a [`Frame`] of observable state after each one.

use std::sync::mpsc::{self, Receiver};

use numscroll_core::ConfigError;
use numscroll_widgets::{
    CommitCallback, DetachedScroller, EditOutcome, NumberScroller, ScrollerEvent, TargetId,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::{Script, ScriptEvent};

/// Reasons a script cannot be replayed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("script defines no scroller; add a [scroller.single] or [scroller.detached] table")]
    MissingScroller,

    #[error("script defines both [scroller.single] and [scroller.detached]")]
    AmbiguousScroller,

    #[error("targets and links need a detached scroller")]
    TargetsOnSingle,

    #[error("invalid scroller configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid behavior for target {id}: {source}")]
    Target {
        id: TargetId,
        #[source]
        source: ConfigError,
    },
}

/// Result type for replay operations
pub type Result<T> = std::result::Result<T, ScriptError>;

/// A value as rendered after an input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueView {
    /// None for single-value scrollers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetId>,
    pub value: f32,
    pub text: String,
}

/// A change notification, in a serializable form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    Value {
        target: Option<TargetId>,
        value: f32,
    },
    Indicator {
        offset: f32,
    },
    Commit {
        target: Option<TargetId>,
        value: f32,
    },
    Selection {
        target: Option<TargetId>,
    },
    EditStarted {
        target: TargetId,
        text: String,
    },
    EditFinished {
        target: TargetId,
        outcome: String,
    },
}

impl From<&ScrollerEvent> for Change {
    fn from(event: &ScrollerEvent) -> Self {
        match event {
            ScrollerEvent::ValueChanged { target, value } => Change::Value {
                target: *target,
                value: *value,
            },
            ScrollerEvent::IndicatorMoved { offset } => Change::Indicator { offset: *offset },
            ScrollerEvent::Committed { target, value } => Change::Commit {
                target: *target,
                value: *value,
            },
            ScrollerEvent::SelectionChanged { target } => Change::Selection { target: *target },
            ScrollerEvent::EditStarted { target, text } => Change::EditStarted {
                target: *target,
                text: text.clone(),
            },
            ScrollerEvent::EditFinished { target, outcome } => Change::EditFinished {
                target: *target,
                outcome: match outcome {
                    EditOutcome::Committed { value } => format!("committed {}", value),
                    EditOutcome::Rejected { kept } => format!("rejected, kept {}", kept),
                    EditOutcome::Cancelled => "cancelled".to_string(),
                },
            },
        }
    }
}

/// Scroller state after one input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub at: u64,
    pub input: String,
    /// Whether the scroller accepted the input
    pub handled: bool,
    pub values: Vec<ValueView>,
    pub indicator_offset: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<TargetId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editing: Option<TargetId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<Change>,
}

enum Widget {
    Single(NumberScroller),
    Detached(DetachedScroller),
}

/// A scroller being driven by a script
pub struct Replay {
    widget: Widget,
    changes: Receiver<Change>,
}

impl Replay {
    /// Build and configure the scroller described by `script`
    pub fn new(script: &Script) -> Result<Self> {
        let section = &script.scroller;
        let (tx, changes) = mpsc::channel();

        let widget = match (section.single, section.detached) {
            (None, None) => return Err(ScriptError::MissingScroller),
            (Some(_), Some(_)) => return Err(ScriptError::AmbiguousScroller),
            (Some(config), None) => {
                if !script.targets.is_empty() || !script.link.is_empty() {
                    return Err(ScriptError::TargetsOnSingle);
                }
                let mut scroller = NumberScroller::new(config)?
                    .with_on_commit(|value| tracing::info!("scroller committed {}", value));
                scroller.set_dimensions(section.width, section.height);
                scroller.subscribe(move |event| {
                    let _ = tx.send(Change::from(event));
                });
                Widget::Single(scroller)
            }
            (None, Some(config)) => {
                let mut scroller = DetachedScroller::new(config)?;
                if let Some(behavior) = section.default_target {
                    scroller = scroller.with_default_behavior(behavior)?;
                }
                scroller.set_dimensions(section.width, section.height);
                scroller.subscribe(move |event| {
                    let _ = tx.send(Change::from(event));
                });
                for entry in &script.targets {
                    let id = entry.id;
                    let on_commit: CommitCallback =
                        Box::new(move |value| tracing::info!("target {} committed {}", id, value));
                    scroller
                        .register_target(id, entry.behavior, Some(on_commit))
                        .map_err(|source| ScriptError::Target { id, source })?;
                }
                if !script.link.is_empty() {
                    scroller.link_to(&script.link);
                }
                Widget::Detached(scroller)
            }
        };

        let replay = Self { widget, changes };
        // Registration noise isn't part of any frame
        replay.changes.try_iter().for_each(drop);
        Ok(replay)
    }

    /// Feed one input and capture the resulting state
    pub fn apply(&mut self, event: &ScriptEvent) -> Frame {
        let typed = event.to_event();
        let handled = match &mut self.widget {
            Widget::Single(scroller) => scroller.handle_event(&typed),
            Widget::Detached(scroller) => scroller.handle_event(&typed),
        };
        tracing::debug!("{}ms {} handled={}", event.at, event.input, handled);

        let mut frame = self.snapshot(event.at, event.input.to_string());
        frame.handled = handled;
        frame.changes = self.changes.try_iter().collect();
        frame
    }

    /// State before any input
    pub fn initial(&self) -> Frame {
        self.snapshot(0, "start".to_string())
    }

    fn snapshot(&self, at: u64, input: String) -> Frame {
        match &self.widget {
            Widget::Single(scroller) => Frame {
                at,
                input,
                handled: true,
                values: vec![ValueView {
                    target: None,
                    value: scroller.value(),
                    text: scroller.formatted(),
                }],
                indicator_offset: scroller.indicator_offset(),
                selected: None,
                editing: None,
                changes: Vec::new(),
            },
            Widget::Detached(scroller) => Frame {
                at,
                input,
                handled: true,
                values: scroller
                    .registry()
                    .ids()
                    .into_iter()
                    .filter_map(|id| {
                        let target = scroller.registry().get(id)?;
                        Some(ValueView {
                            target: Some(id),
                            value: target.value(),
                            text: target.formatted(),
                        })
                    })
                    .collect(),
                indicator_offset: scroller.indicator_offset(),
                selected: scroller.selected_id(),
                editing: scroller.editing_id(),
                changes: Vec::new(),
            },
        }
    }
}

/// Replay a whole script, returning the initial frame followed by one frame per input
pub fn run(script: &Script) -> Result<Vec<Frame>> {
    let mut replay = Replay::new(script)?;
    let mut frames = Vec::with_capacity(script.events.len() + 1);
    frames.push(replay.initial());
    for event in &script.events {
        frames.push(replay.apply(event));
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn script(text: &str) -> Script {
        Script::parse(text).unwrap()
    }

    #[test]
    fn test_single_replay() {
        let frames = run(&script(
            r#"
            [scroller.single]

            [[events]]
            kind = "drag_start"

            [[events]]
            at = 16
            kind = "drag"
            delta = -40.0

            [[events]]
            at = 32
            kind = "drag"
            delta = -40.0

            [[events]]
            at = 48
            kind = "drag"
            delta = -30.0

            [[events]]
            at = 64
            kind = "drag_end"
            "#,
        ))
        .unwrap();

        assert_eq!(frames.len(), 6);
        assert_eq!(frames[0].values[0].text, "0");
        assert_eq!(frames[3].values[0].value, 0.0);
        assert_eq!(frames[4].values[0].value, 1.0);
        assert_eq!(
            frames[4].changes[0],
            Change::Value {
                target: None,
                value: 1.0
            }
        );
        assert_eq!(
            frames[5].changes.last(),
            Some(&Change::Commit {
                target: None,
                value: 1.0
            })
        );
    }

    #[test]
    fn test_detached_replay_with_edit() {
        let frames = run(&script(
            r#"
            link = [2, 1]

            [scroller.detached]

            [scroller.default_target]
            step = 0.5

            [[targets]]
            id = 1

            [targets.behavior]
            start_value = 6.0
            range = { min = 0.0, max = 10.0 }
            double_tap_to_edit = true

            [[targets]]
            id = 2

            [[events]]
            kind = "double_tap"
            id = 1

            [[events]]
            at = 10
            kind = "edit_submit"
            text = "7.5"

            [[events]]
            at = 20
            kind = "tap"
            id = 2
            "#,
        ))
        .unwrap();

        assert_eq!(frames[0].selected, Some(2));
        assert_eq!(frames[0].values[1].text, "0");
        assert!(frames[0].changes.is_empty());

        assert_eq!(frames[1].editing, Some(1));
        assert_eq!(frames[1].selected, Some(1));
        assert!(frames[1].changes.contains(&Change::EditStarted {
            target: 1,
            text: "6".to_string()
        }));

        assert_eq!(frames[2].editing, None);
        assert_eq!(frames[2].values[0].value, 7.5);
        assert_eq!(frames[3].selected, Some(2));
    }

    #[test]
    fn test_unhandled_input_is_reported() {
        let frames = run(&script(
            r#"
            [scroller.single]

            [[events]]
            kind = "tap"
            id = 3
            "#,
        ))
        .unwrap();
        assert!(!frames[1].handled);
    }

    #[test]
    fn test_script_errors() {
        assert_eq!(
            Replay::new(&script("[scroller]\n")).err(),
            Some(ScriptError::MissingScroller)
        );
        assert_eq!(
            Replay::new(&script("[scroller.single]\n[scroller.detached]\n")).err(),
            Some(ScriptError::AmbiguousScroller)
        );
        assert_eq!(
            Replay::new(&script("link = [1]\n[scroller.single]\n")).err(),
            Some(ScriptError::TargetsOnSingle)
        );
        assert_eq!(
            Replay::new(&script("[scroller.single]\nstep = -1.0\n")).err(),
            Some(ScriptError::Config(ConfigError::NonPositiveStep(-1.0)))
        );
        assert_eq!(
            Replay::new(&script(
                r#"
                [scroller.detached]

                [[targets]]
                id = 4

                [targets.behavior]
                auto_increment_on_far_scroll = true
                "#
            ))
            .err(),
            Some(ScriptError::Target {
                id: 4,
                source: ConfigError::AutoIncrementWithSync
            })
        );
    }

    #[test]
    fn test_frame_json() {
        let frames = run(&script(
            r#"
            [scroller.single]

            [[events]]
            kind = "drag_start"
            "#,
        ))
        .unwrap();
        let json = serde_json::to_value(&frames[1]).unwrap();
        assert_eq!(json["input"], "drag_start");
        assert_eq!(json["values"][0]["text"], "0");
        assert!(json.get("selected").is_none());
        assert!(json.get("changes").is_none());
    }
}
