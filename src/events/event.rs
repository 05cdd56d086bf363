#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::key::{Key, ModifierKey, NavigationKey};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventKind {
    /// A single key press.
    #[default]
    Keyboard,
    /// Text inserted at once without a selection, such as a paste or an
    /// autocompletion.
    Insert,
    /// A selection `start_pos..end_pos` overwritten by `content`.
    Replacement,
}

/// One normalised record of a keystroke log.
///
/// `start_pos` is the cursor position before the event, in characters. For a
/// backspace the removed character sits right before it, for a delete right
/// after it. `doc_length` is the raw length logged alongside the event, which
/// still has to be corrected for the quirks of the logger that wrote it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: EventKind,

    #[cfg_attr(feature = "serde", serde(default))]
    pub key: Key,

    #[cfg_attr(feature = "serde", serde(default))]
    pub content: String,

    pub start_pos: usize,

    #[cfg_attr(feature = "serde", serde(default))]
    pub end_pos: Option<usize>,

    pub doc_length: usize,

    /// Seconds since the start of the session.
    #[cfg_attr(feature = "serde", serde(default))]
    pub start_time: Option<f64>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub end_time: Option<f64>,

    /// Time between the end of the previous event and the start of this one,
    /// filled in by `EventLog::new`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pause: Option<f64>,
}

impl Event {
    fn keyboard(key: Key, content: String, start_pos: usize, doc_length: usize) -> Self {
        Self {
            kind: EventKind::Keyboard,
            key,
            content,
            start_pos,
            end_pos: None,
            doc_length,
            start_time: None,
            end_time: None,
            pause: None,
        }
    }

    #[must_use]
    pub fn production(start_pos: usize, content: &str, doc_length: usize) -> Self {
        Self::keyboard(Key::Production, content.to_owned(), start_pos, doc_length)
    }

    #[must_use]
    pub fn backspace(start_pos: usize, doc_length: usize) -> Self {
        Self::keyboard(Key::Backspace, String::new(), start_pos, doc_length)
    }

    #[must_use]
    pub fn delete(start_pos: usize, doc_length: usize) -> Self {
        Self::keyboard(Key::Delete, String::new(), start_pos, doc_length)
    }

    #[must_use]
    pub fn modifier(modifier: ModifierKey, start_pos: usize, doc_length: usize) -> Self {
        Self::keyboard(Key::Modifier(modifier), String::new(), start_pos, doc_length)
    }

    /// A cursor movement. Without an explicit `end_pos` the destination is
    /// taken from the next event once the log is linked.
    #[must_use]
    pub fn navigation(
        key: NavigationKey,
        start_pos: usize,
        end_pos: Option<usize>,
        doc_length: usize,
    ) -> Self {
        Self {
            end_pos,
            ..Self::keyboard(Key::Navigation(key), String::new(), start_pos, doc_length)
        }
    }

    #[must_use]
    pub fn insert(start_pos: usize, content: &str, doc_length: usize) -> Self {
        Self {
            kind: EventKind::Insert,
            ..Self::production(start_pos, content, doc_length)
        }
    }

    #[must_use]
    pub fn replacement(
        start_pos: usize,
        end_pos: Option<usize>,
        content: &str,
        doc_length: usize,
    ) -> Self {
        Self {
            kind: EventKind::Replacement,
            end_pos,
            ..Self::production(start_pos, content, doc_length)
        }
    }

    #[must_use]
    pub fn with_times(self, start_time: f64, end_time: f64) -> Self {
        Self {
            start_time: Some(start_time),
            end_time: Some(end_time),
            ..self
        }
    }

    #[must_use]
    pub fn is_replacement(&self) -> bool { self.kind == EventKind::Replacement }

    /// Number of characters produced by the event.
    #[must_use]
    pub fn content_len(&self) -> usize { self.content.chars().count() }
}
