use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::events::Event;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Production at the end of the text.
    Append,
    /// Production before the end of the text.
    Insertion,
    Navigation,
    /// Removal of characters reaching the end of the text.
    Deletion,
    /// Removal of characters in the middle of the text.
    Midletion,
    Replacement,
    /// More than one character produced at once.
    Pasting,
}

impl ActionType {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ActionType::Append => "append",
            ActionType::Insertion => "insertion",
            ActionType::Navigation => "navigation",
            ActionType::Deletion => "deletion",
            ActionType::Midletion => "midletion",
            ActionType::Replacement => "replacement",
            ActionType::Pasting => "pasting",
        }
    }

    #[must_use]
    pub fn is_deletion(self) -> bool { matches!(self, ActionType::Deletion | ActionType::Midletion) }

    #[must_use]
    pub fn is_production(self) -> bool {
        matches!(
            self,
            ActionType::Append | ActionType::Insertion | ActionType::Pasting
        )
    }

    /// Actions of these types always form a group of their own.
    #[must_use]
    pub fn is_never_aggregated(self) -> bool {
        matches!(
            self,
            ActionType::Replacement | ActionType::Pasting | ActionType::Navigation
        )
    }
}

impl Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.label()) }
}

/// The selection overwritten by a replacement.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacedSpan {
    /// Index of the last replaced character.
    pub end_pos: usize,
    /// Number of characters of the replacing text.
    pub text_len: usize,
}

/// A single edit derived from one event.
///
/// Positions refer to the text as it was right before the action. Productions
/// span `start_pos..=end_pos` forward, deletions point at the one character
/// they remove, so a run of backspaces walks backwards.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub action_type: ActionType,
    pub content: String,
    pub start_pos: usize,
    pub end_pos: Option<usize>,
    pub text_len_after: usize,
    replaced: Option<ReplacedSpan>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub pause: Option<f64>,
}

impl Action {
    fn new(
        action_type: ActionType,
        content: String,
        start_pos: usize,
        end_pos: Option<usize>,
        text_len_after: usize,
    ) -> Self {
        Self {
            action_type,
            content,
            start_pos,
            end_pos,
            text_len_after,
            replaced: None,
            start_time: None,
            end_time: None,
            pause: None,
        }
    }

    fn production(
        action_type: ActionType,
        content: &str,
        start_pos: usize,
        text_len_after: usize,
    ) -> Self {
        let length = content.chars().count();
        let end_pos = (length > 0).then(|| start_pos + length - 1);

        Self::new(
            action_type,
            content.to_owned(),
            start_pos,
            end_pos,
            text_len_after,
        )
    }

    #[must_use]
    pub fn append(content: &str, start_pos: usize, text_len_after: usize) -> Self {
        Self::production(ActionType::Append, content, start_pos, text_len_after)
    }

    #[must_use]
    pub fn insertion(content: &str, start_pos: usize, text_len_after: usize) -> Self {
        Self::production(ActionType::Insertion, content, start_pos, text_len_after)
    }

    #[must_use]
    pub fn pasting(content: &str, start_pos: usize, text_len_after: usize) -> Self {
        Self::production(ActionType::Pasting, content, start_pos, text_len_after)
    }

    /// Removal of the character at `removed_pos` reaching the end of the text.
    #[must_use]
    pub fn deletion(removed_pos: usize, text_len_after: usize) -> Self {
        Self::new(
            ActionType::Deletion,
            String::new(),
            removed_pos,
            Some(removed_pos),
            text_len_after,
        )
    }

    #[must_use]
    pub fn midletion(removed_pos: usize, text_len_after: usize) -> Self {
        Self::new(
            ActionType::Midletion,
            String::new(),
            removed_pos,
            Some(removed_pos),
            text_len_after,
        )
    }

    #[must_use]
    pub fn replacement(
        content: &str,
        start_pos: usize,
        replaced: ReplacedSpan,
        text_len_after: usize,
    ) -> Self {
        Self {
            replaced: Some(replaced),
            ..Self::production(ActionType::Replacement, content, start_pos, text_len_after)
        }
    }

    #[must_use]
    pub fn navigation(start_pos: usize, end_pos: Option<usize>, text_len_after: usize) -> Self {
        Self::new(
            ActionType::Navigation,
            String::new(),
            start_pos,
            end_pos,
            text_len_after,
        )
    }

    /// Copy the timing of the event the action was derived from.
    #[must_use]
    pub fn with_timing_of(self, event: &Event) -> Self {
        Self {
            start_time: event.start_time,
            end_time: event.end_time,
            pause: event.pause,
            ..self
        }
    }

    #[must_use]
    pub fn with_times(self, start_time: f64, end_time: f64, pause: Option<f64>) -> Self {
        Self {
            start_time: Some(start_time),
            end_time: Some(end_time),
            pause,
            ..self
        }
    }

    /// Switch between `Deletion` and `Midletion` once the extent of the
    /// deletion run is known.
    pub(crate) fn relabel_deletion(&mut self, reaches_end: bool) {
        debug_assert!(self.action_type.is_deletion());
        self.action_type = if reaches_end {
            ActionType::Deletion
        } else {
            ActionType::Midletion
        };
    }

    #[must_use]
    pub fn replaced(&self) -> Option<ReplacedSpan> { self.replaced }

    #[must_use]
    pub fn content_len(&self) -> usize { self.content.chars().count() }

    #[must_use]
    pub fn is_timed(&self) -> bool { self.start_time.is_some() && self.end_time.is_some() }
}
