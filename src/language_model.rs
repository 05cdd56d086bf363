mod rule_based;
mod tagged_word;

pub use rule_based::RuleBasedModel;
pub use tagged_word::TaggedWord;

use crate::errors::LanguageModelError;

/// The linguistic analysis the pipeline relies on. Implementations are
/// shared between documents processed in parallel.
pub trait LanguageModel: Send + Sync {
    /// Split `text` into tokens, whitespace and punctuation included.
    fn tag_words(&self, text: &str) -> Result<Vec<TaggedWord>, LanguageModelError>;

    /// Split `text` into sentence-like pieces. Whitespace following a
    /// sentence stays attached to it, so the pieces concatenate to `text`.
    fn segment_text(&self, text: &str) -> Result<Vec<String>, LanguageModelError>;

    fn check_if_typo(&self, token: &str) -> Result<bool, LanguageModelError>;
}
