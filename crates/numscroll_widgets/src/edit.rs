//! Text edit sessions
//!
//! Only one target can be edited at a time; the registry holds at most one
//! [`EditSession`].

use numscroll_core::edit_text;

use crate::target::TargetId;

/// An open edit of one target's value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    target: TargetId,
    buffer: String,
}

impl EditSession {
    /// Open a session seeded with `value` as edit text
    pub fn new(target: TargetId, value: f32) -> Self {
        Self {
            target,
            buffer: edit_text(value),
        }
    }

    pub fn target(&self) -> TargetId {
        self.target
    }

    /// Text currently in the edit field
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Replace the edit text as the user types
    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }
}

/// How an edit session ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOutcome {
    /// Input parsed; the clamped value was stored
    Committed { value: f32 },
    /// Input didn't parse as a finite number; the previous value was kept
    Rejected { kept: f32 },
    /// Session closed without submitting
    Cancelled,
}

/// Parse submitted edit text into a finite number
///
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected like
/// any other unparseable input.
pub fn parse_edit(raw: &str) -> Option<f32> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_seed() {
        assert_eq!(EditSession::new(1, 6.0).buffer(), "6");
        assert_eq!(EditSession::new(1, 6.25).buffer(), "6.25");
    }

    #[test]
    fn test_parse_edit() {
        assert_eq!(parse_edit("7.5"), Some(7.5));
        assert_eq!(parse_edit("  -3 "), Some(-3.0));
        assert_eq!(parse_edit("abc"), None);
        assert_eq!(parse_edit(""), None);
        assert_eq!(parse_edit("NaN"), None);
        assert_eq!(parse_edit("inf"), None);
    }
}
