#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A token of the text together with what the language model knows about it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedWord {
    pub text: String,
    /// Coarse part of speech, e.g. `PUNCT`, `SPACE`, `NUM`.
    pub pos: String,
    pub lemma: String,
    pub dependency_relation: Option<String>,
    pub is_out_of_vocabulary: bool,
    pub is_typo: bool,
    pub is_punctuation: bool,
    pub is_whitespace: bool,
}

impl TaggedWord {
    /// Whether the token is an actual word rather than whitespace or
    /// punctuation.
    #[must_use]
    pub fn is_word(&self) -> bool { !self.is_punctuation && !self.is_whitespace }
}
