use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    text_units::{TextUnitState, TextUnitType},
    utils::{common_prefix_len::common_prefix_len, common_suffix_len::common_suffix_len},
};

/// Identifies one sentence across all the snapshots it appears in.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SentenceId(Uuid);

impl SentenceId {
    #[must_use]
    pub fn new() -> Self { Self(Uuid::new_v4()) }
}

impl Default for SentenceId {
    fn default() -> Self { Self::new() }
}

impl Display for SentenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { self.0.fmt(f) }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditingStage {
    /// The sentence has never been complete yet.
    PreCompletion,
    /// The sentence is being revised after having been complete.
    PostCompletion,
}

/// The difference between two consecutive versions of a sentence: the
/// characters `offset..offset + removed.len()` got replaced by `inserted`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocalEdit {
    pub offset: usize,
    pub removed: String,
    pub inserted: String,
}

impl LocalEdit {
    #[must_use]
    pub fn between(previous: &str, current: &str) -> Self {
        let old = previous.chars().collect::<Vec<_>>();
        let new = current.chars().collect::<Vec<_>>();

        let prefix = common_prefix_len(&old[..], 0..old.len(), &new[..], 0..new.len());
        let suffix = common_suffix_len(&old[..], prefix..old.len(), &new[..], prefix..new.len());

        Self {
            offset: prefix,
            removed: old[prefix..old.len() - suffix].iter().collect(),
            inserted: new[prefix..new.len() - suffix].iter().collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.removed.is_empty() && self.inserted.is_empty() }
}

/// A sentence as it was in one snapshot.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceVersion {
    pub revision_id: usize,
    pub text: String,
    pub unit_type: TextUnitType,
    pub state: TextUnitState,
    /// Change from the previous version of the sentence.
    pub edit: LocalEdit,
    pub stage: EditingStage,
}

impl SentenceVersion {
    #[must_use]
    pub fn is_deleted(&self) -> bool { self.state == TextUnitState::Deleted }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("", "Hi.", 0, "", "Hi."; "from nothing")]
    #[test_case("The cat sat.", "The black cat sat.", 4, "", "black "; "insertion")]
    #[test_case("The cat sat.", "The dog sat.", 4, "cat", "dog"; "replacement")]
    #[test_case("Grüße, Welt!", "Grüße Welt!", 5, ",", ""; "deletion")]
    #[test_case("aaa", "aaaa", 3, "", "a"; "repeated characters")]
    fn test_local_edit(previous: &str, current: &str, offset: usize, removed: &str, inserted: &str) {
        assert_eq!(LocalEdit::between(previous, current), LocalEdit {
            offset,
            removed: removed.to_owned(),
            inserted: inserted.to_owned(),
        });
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(SentenceId::new(), SentenceId::new());
    }
}
