#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a transforming sequence does to the text. End positions are
/// inclusive and refer to the text before the edit.
///
/// The removed text of deletions and replacements is unknown until the edit
/// is replayed on the text it applies to.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "label", rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Append {
        start_pos: usize,
        text: String,
    },
    Insertion {
        start_pos: usize,
        text: String,
    },
    Pasting {
        start_pos: usize,
        text: String,
    },
    Deletion {
        start_pos: usize,
        end_pos: usize,
        removed: String,
    },
    Midletion {
        start_pos: usize,
        end_pos: usize,
        removed: String,
    },
    /// `start_pos..=end_pos` is replaced by `text`.
    Replacement {
        start_pos: usize,
        end_pos: usize,
        text: String,
        removed: String,
        replacement_text_len: usize,
    },
    Navigation {
        start_pos: usize,
        end_pos: Option<usize>,
    },
}

impl Edit {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Edit::Append { .. } => "append",
            Edit::Insertion { .. } => "insertion",
            Edit::Pasting { .. } => "pasting",
            Edit::Deletion { .. } => "deletion",
            Edit::Midletion { .. } => "midletion",
            Edit::Replacement { .. } => "replacement",
            Edit::Navigation { .. } => "navigation",
        }
    }

    #[must_use]
    pub fn start_pos(&self) -> usize {
        match self {
            Edit::Append { start_pos, .. }
            | Edit::Insertion { start_pos, .. }
            | Edit::Pasting { start_pos, .. }
            | Edit::Deletion { start_pos, .. }
            | Edit::Midletion { start_pos, .. }
            | Edit::Replacement { start_pos, .. }
            | Edit::Navigation { start_pos, .. } => *start_pos,
        }
    }

    /// The last affected position. For productions that is the position of
    /// the last produced character in the text after the edit.
    #[must_use]
    pub fn end_pos(&self) -> Option<usize> {
        match self {
            Edit::Append { start_pos, text }
            | Edit::Insertion { start_pos, text }
            | Edit::Pasting { start_pos, text } => {
                Some(start_pos + text.chars().count().max(1) - 1)
            }
            Edit::Deletion { end_pos, .. }
            | Edit::Midletion { end_pos, .. }
            | Edit::Replacement { end_pos, .. } => Some(*end_pos),
            Edit::Navigation { end_pos, .. } => *end_pos,
        }
    }

    /// The produced text, or the removed text of deletions.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Edit::Append { text, .. }
            | Edit::Insertion { text, .. }
            | Edit::Pasting { text, .. }
            | Edit::Replacement { text, .. } => text,
            Edit::Deletion { removed, .. } | Edit::Midletion { removed, .. } => removed,
            Edit::Navigation { .. } => "",
        }
    }

    #[must_use]
    pub fn inserted(&self) -> &str {
        match self {
            Edit::Append { text, .. }
            | Edit::Insertion { text, .. }
            | Edit::Pasting { text, .. }
            | Edit::Replacement { text, .. } => text,
            Edit::Deletion { .. } | Edit::Midletion { .. } | Edit::Navigation { .. } => "",
        }
    }

    #[must_use]
    pub fn removed(&self) -> &str {
        match self {
            Edit::Deletion { removed, .. }
            | Edit::Midletion { removed, .. }
            | Edit::Replacement { removed, .. } => removed,
            Edit::Append { .. }
            | Edit::Insertion { .. }
            | Edit::Pasting { .. }
            | Edit::Navigation { .. } => "",
        }
    }

    /// Span of the text removed by the edit, in positions of the text
    /// before it.
    #[must_use]
    pub fn removed_span(&self) -> Option<(usize, usize)> {
        match self {
            Edit::Deletion {
                start_pos, end_pos, ..
            }
            | Edit::Midletion {
                start_pos, end_pos, ..
            }
            | Edit::Replacement {
                start_pos, end_pos, ..
            } => Some((*start_pos, *end_pos)),
            _ => None,
        }
    }

    #[must_use]
    pub fn replacement_text_len(&self) -> Option<usize> {
        match self {
            Edit::Replacement {
                replacement_text_len,
                ..
            } => Some(*replacement_text_len),
            _ => None,
        }
    }

    /// Number of characters produced or removed by the edit. Known before
    /// replay, unlike the removed text itself.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Edit::Append { text, .. }
            | Edit::Insertion { text, .. }
            | Edit::Pasting { text, .. }
            | Edit::Replacement { text, .. } => text.chars().count(),
            Edit::Deletion {
                start_pos, end_pos, ..
            }
            | Edit::Midletion {
                start_pos, end_pos, ..
            } => end_pos + 1 - start_pos,
            Edit::Navigation { .. } => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(
            self,
            Edit::Append { .. } | Edit::Insertion { .. } | Edit::Pasting { .. }
        )
    }

    #[must_use]
    pub fn is_deletion(&self) -> bool {
        matches!(self, Edit::Deletion { .. } | Edit::Midletion { .. })
    }

    #[must_use]
    pub fn is_navigation(&self) -> bool { matches!(self, Edit::Navigation { .. }) }

    /// Record the text removed by a deletion or replacement once it is known.
    pub(crate) fn set_removed(&mut self, text: String) {
        match self {
            Edit::Deletion { removed, .. }
            | Edit::Midletion { removed, .. }
            | Edit::Replacement { removed, .. } => *removed = text,
            Edit::Append { .. }
            | Edit::Insertion { .. }
            | Edit::Pasting { .. }
            | Edit::Navigation { .. } => {}
        }
    }
}
