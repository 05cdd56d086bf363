#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single log record that cannot be turned into an action. These are
/// recoverable: the record is skipped and the rest of the document is still
/// processed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Event {index} is a replacement without the end of its selection")]
    MissingReplacementEnd { index: usize },

    #[error("Event {index} deletes before the start of the text")]
    DeletionBeforeStart { index: usize },

    #[error(
        "Event {index} reports a document length of {doc_length} which becomes negative after \
         the correction of {correction}"
    )]
    InvalidLength {
        index: usize,
        doc_length: usize,
        correction: isize,
    },

    #[error("Event {index} is a production without any content")]
    EmptyProduction { index: usize },
}

/// Failure reported by a `LanguageModel` implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageModelError {
    #[error("Language model failed to {operation}: {message}")]
    Failed {
        operation: &'static str,
        message: String,
    },

    #[error("Sentence segmentation of {text:?} does not reconstruct the input text")]
    InvalidSegmentation { text: String },
}

/// Document-level failures. Any of these aborts the pipeline for the
/// current document only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// The positions of a transforming sequence don't fit the replayed
    /// buffer, which means that the log's cursor or length fields are out of
    /// sync with the accumulated text.
    #[error(
        "Buffer out of sync at transforming sequence {ts_index} ({label}): the edit spans \
         {start_pos}..={end_pos} but the buffer only has {buffer_len} characters"
    )]
    BufferDesync {
        ts_index: usize,
        label: &'static str,
        start_pos: usize,
        end_pos: usize,
        buffer_len: usize,
    },

    #[error(transparent)]
    LanguageModel(#[from] LanguageModelError),

    #[error("The text units of revision {revision_id} do not concatenate to the snapshot's text")]
    BrokenConcatenation { revision_id: usize },

    #[error("Cannot build a text unit without its `{0}`")]
    IncompleteTextUnit(&'static str),

    #[error("Invalid action group `{key}`: {reason}")]
    InvalidActionGroup { key: String, reason: &'static str },
}
