#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    text_units::{Reconciled, TextUnit, TextUnitState},
    transforming_sequence::TransformingSequence,
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditScope {
    /// The edit changed one sentence.
    WithinSentence,
    /// The edit changed several sentences.
    CrossSentence,
    /// The edit produced or removed exactly one whole sentence.
    WholeSentence,
    /// Only whitespace between sentences changed.
    Interspace,
}

/// How far an edit reached into the text.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTransformation {
    pub scope: EditScope,
    /// The texts of the sentences and candidates changed by the edit.
    pub impacted_sentences: Vec<String>,
}

impl TextTransformation {
    #[must_use]
    pub fn classify(sequence: &TransformingSequence, reconciled: &Reconciled) -> Self {
        let impacted = reconciled
            .units
            .iter()
            .filter(|unit| !unit.state.is_unchanged())
            .chain(&reconciled.deleted)
            .filter(|unit| unit.unit_type.is_sentence_like())
            .collect::<Vec<_>>();

        let scope = match impacted.as_slice() {
            [] => EditScope::Interspace,
            [unit] if is_whole_sentence(unit, sequence) => EditScope::WholeSentence,
            [_] => EditScope::WithinSentence,
            _ => EditScope::CrossSentence,
        };

        Self {
            scope,
            impacted_sentences: impacted.iter().map(|unit| unit.text.clone()).collect(),
        }
    }
}

fn is_whole_sentence(unit: &TextUnit, sequence: &TransformingSequence) -> bool {
    match unit.state {
        TextUnitState::New => sequence.edit.inserted().contains(unit.text.as_str()),
        TextUnitState::Deleted => sequence.edit.removed().contains(unit.text.as_str()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        text_units::{StateRule, TextUnitType},
        transforming_sequence::Edit,
    };

    fn unit(unit_type: TextUnitType, text: &str, state: TextUnitState) -> TextUnit {
        TextUnit::builder()
            .unit_type(unit_type)
            .text(text)
            .state(state, StateRule::Fallback)
            .tpsf_id(1)
            .build()
            .unwrap()
    }

    fn pasting(text: &str) -> TransformingSequence {
        TransformingSequence::new(Edit::Pasting {
            start_pos: 0,
            text: text.to_owned(),
        })
    }

    #[test]
    fn test_pasted_sentence_is_whole() {
        let reconciled = Reconciled {
            units: vec![
                unit(TextUnitType::Sentence, "Hi.", TextUnitState::UnchangedPre),
                unit(TextUnitType::SentenceInterspace, " ", TextUnitState::New),
                unit(TextUnitType::Sentence, "Bye.", TextUnitState::New),
            ],
            deleted: Vec::new(),
        };

        let transformation = TextTransformation::classify(&pasting(" Bye."), &reconciled);

        assert_eq!(transformation.scope, EditScope::WholeSentence);
        assert_eq!(transformation.impacted_sentences, vec!["Bye.".to_owned()]);
    }

    #[test]
    fn test_scopes() {
        let modified = unit(TextUnitType::Sentence, "Hi there.", TextUnitState::Modified);
        let split = unit(TextUnitType::SentenceCandidate, "there", TextUnitState::Split);
        let space = unit(TextUnitType::SentenceInterspace, "  ", TextUnitState::Modified);

        let classify = |units: Vec<TextUnit>| {
            TextTransformation::classify(
                &pasting(" there"),
                &Reconciled {
                    units,
                    deleted: Vec::new(),
                },
            )
            .scope
        };

        assert_eq!(classify(vec![modified.clone()]), EditScope::WithinSentence);
        assert_eq!(classify(vec![modified, split]), EditScope::CrossSentence);
        assert_eq!(classify(vec![space]), EditScope::Interspace);
    }
}
