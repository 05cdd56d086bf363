use log::debug;

use super::text_unit::{TextUnit, TextUnitType};
use crate::{
    errors::{LanguageModelError, PipelineError},
    language_model::LanguageModel,
    utils::{
        char_slice::{char_len, char_match_indices, char_slice},
        punctuation::{is_closing_mark, is_closing_quote, is_opening_mark, is_terminal_punctuation},
    },
};

/// A piece of a snapshot's text before it is compared with the previous
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedUnit {
    pub unit_type: TextUnitType,
    pub text: String,
}

impl SegmentedUnit {
    fn whitespace(text: String) -> Self {
        let unit_type = if text.contains('\n') {
            TextUnitType::ParagraphInterspace
        } else {
            TextUnitType::SentenceInterspace
        };

        Self { unit_type, text }
    }

    fn core(text: String) -> Self {
        Self {
            unit_type: classify_core(&text),
            text,
        }
    }
}

/// Split `text` into sentences, sentence candidates and the whitespace
/// between them. The units always concatenate to `text`.
///
/// Complete sentences of the previous snapshot are kept as units of their
/// own whenever they still occur in the text, even if the language model
/// glues them to their neighbours.
pub fn segment(
    text: &str,
    previous_units: &[TextUnit],
    model: &dyn LanguageModel,
) -> Result<Vec<SegmentedUnit>, PipelineError> {
    let pieces = model.segment_text(text)?;
    if pieces.concat() != text {
        return Err(LanguageModelError::InvalidSegmentation {
            text: text.to_owned(),
        }
        .into());
    }

    let mut units = Vec::new();
    for piece in &pieces {
        for unit in split_piece(piece) {
            push_repairing_closing_quote(&mut units, unit);
        }
    }

    let mut units = merge_until_fixpoint(units);

    let mut previous_sentences = previous_units
        .iter()
        .filter(|unit| unit.unit_type == TextUnitType::Sentence)
        .map(|unit| unit.text.as_str())
        .collect::<Vec<_>>();
    previous_sentences.sort_by_key(|sentence| std::cmp::Reverse(char_len(sentence)));
    previous_sentences.dedup();

    if split_out_previous_sentences(&mut units, &previous_sentences) {
        units = merge_until_fixpoint(units);
    }

    debug_assert_eq!(
        units.iter().map(|unit| unit.text.as_str()).collect::<String>(),
        text
    );

    Ok(units)
}

/// Separate the leading and trailing whitespace of a piece, as well as any
/// line breaks inside it.
fn split_piece(piece: &str) -> Vec<SegmentedUnit> {
    let mut runs: Vec<(bool, String)> = Vec::new();
    for c in piece.chars() {
        match runs.last_mut() {
            Some((is_whitespace, run)) if *is_whitespace == c.is_whitespace() => run.push(c),
            _ => runs.push((c.is_whitespace(), c.to_string())),
        }
    }

    let run_count = runs.len();
    let mut units = Vec::new();
    let mut core = String::new();

    for (i, (is_whitespace, run)) in runs.into_iter().enumerate() {
        let is_separate = core.is_empty() || i + 1 == run_count || run.contains('\n');

        if is_whitespace && is_separate {
            if !core.is_empty() {
                units.push(SegmentedUnit::core(std::mem::take(&mut core)));
            }
            units.push(SegmentedUnit::whitespace(run));
        } else {
            core.push_str(&run);
        }
    }

    if !core.is_empty() {
        units.push(SegmentedUnit::core(core));
    }

    units
}

/// Sentence segmenters tend to attach the closing quotation mark of a
/// sentence to the start of the next one. Such marks are moved back.
fn push_repairing_closing_quote(units: &mut Vec<SegmentedUnit>, unit: SegmentedUnit) {
    let quote_len = unit
        .text
        .chars()
        .take_while(|c| is_closing_quote(*c))
        .count();

    match units.last_mut() {
        Some(previous)
            if quote_len > 0
                && previous.unit_type.is_sentence_like()
                && unit.unit_type.is_sentence_like() =>
        {
            debug!("Moving closing quote of {:?} to {:?}", unit.text, previous.text);

            previous.text.push_str(char_slice(&unit.text, 0..quote_len));
            previous.unit_type = classify_core(&previous.text);
            units.extend(split_piece(char_slice(&unit.text, quote_len..usize::MAX)));
        }
        _ => units.push(unit),
    }
}

/// A sentence starts with an upper-case letter and ends with terminal
/// punctuation, disregarding quotation marks and brackets around it.
fn classify_core(core: &str) -> TextUnitType {
    let starts_upper = core
        .chars()
        .find(|c| !is_opening_mark(*c))
        .is_some_and(char::is_uppercase);
    let ends_terminal = core
        .chars()
        .rev()
        .find(|c| !is_closing_mark(*c))
        .is_some_and(is_terminal_punctuation);

    if starts_upper && ends_terminal {
        TextUnitType::Sentence
    } else {
        TextUnitType::SentenceCandidate
    }
}

fn can_merge(left: TextUnitType, right: TextUnitType) -> bool {
    (left.is_interspace() && right.is_interspace())
        || (left == TextUnitType::SentenceCandidate && right == TextUnitType::SentenceCandidate)
}

fn merge_until_fixpoint(mut units: Vec<SegmentedUnit>) -> Vec<SegmentedUnit> {
    loop {
        let count = units.len();
        let mut merged: Vec<SegmentedUnit> = Vec::with_capacity(count);

        for unit in units {
            match merged.last_mut() {
                Some(last) if can_merge(last.unit_type, unit.unit_type) => {
                    last.text.push_str(&unit.text);
                    *last = if last.unit_type.is_interspace() {
                        SegmentedUnit::whitespace(std::mem::take(&mut last.text))
                    } else {
                        SegmentedUnit::core(std::mem::take(&mut last.text))
                    };
                }
                _ => merged.push(unit),
            }
        }

        if merged.len() == count {
            return merged;
        }
        units = merged;
    }
}

/// Returns whether any unit was split.
fn split_out_previous_sentences(units: &mut Vec<SegmentedUnit>, previous_sentences: &[&str]) -> bool {
    let mut has_split = false;
    let mut i = 0;

    while i < units.len() {
        let split = if units[i].unit_type.is_interspace() {
            None
        } else {
            previous_sentences
                .iter()
                .find_map(|sentence| find_split(&units[i].text, sentence))
        };

        match split {
            Some((start, end)) => {
                let text = std::mem::take(&mut units[i].text);
                debug!(
                    "Splitting {text:?} to keep {:?} as a sentence",
                    char_slice(&text, start..end)
                );

                let mut replacement = split_piece(char_slice(&text, 0..start));
                replacement.push(SegmentedUnit::core(char_slice(&text, start..end).to_owned()));
                replacement.extend(split_piece(char_slice(&text, end..usize::MAX)));

                units.splice(i..=i, replacement);
                has_split = true;
            }
            None => i += 1,
        }
    }

    has_split
}

/// Character range of `sentence` strictly inside `text`, found at word
/// boundaries and after the end of an earlier sentence.
fn find_split(text: &str, sentence: &str) -> Option<(usize, usize)> {
    if text == sentence {
        return None;
    }

    let chars = text.chars().collect::<Vec<_>>();
    let sentence_len = char_len(sentence);

    char_match_indices(text, sentence)
        .into_iter()
        .map(|start| (start, start + sentence_len))
        .find(|&(start, end)| {
            let before = chars[..start].iter().collect::<String>();
            let before = before.trim_end();

            let is_word_boundary = (start == 0 || chars[start - 1].is_whitespace())
                && (end == chars.len() || chars[end].is_whitespace());
            let follows_sentence = before.is_empty()
                || before
                    .chars()
                    .next_back()
                    .is_some_and(|c| is_terminal_punctuation(c) || is_closing_mark(c));

            is_word_boundary && follows_sentence
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use TextUnitType::{ParagraphInterspace, Sentence, SentenceCandidate, SentenceInterspace};
    use crate::{
        config::Language,
        language_model::{RuleBasedModel, TaggedWord},
        text_units::{StateRule, TextUnitState},
    };

    fn units(text: &str, previous: &[TextUnit]) -> Vec<(TextUnitType, String)> {
        segment(text, previous, &RuleBasedModel::new(Language::English))
            .unwrap()
            .into_iter()
            .map(|unit| (unit.unit_type, unit.text))
            .collect()
    }

    fn expected(units: &[(TextUnitType, &str)]) -> Vec<(TextUnitType, String)> {
        units
            .iter()
            .map(|(unit_type, text)| (*unit_type, (*text).to_owned()))
            .collect()
    }

    fn sentence(text: &str) -> TextUnit {
        TextUnit::builder()
            .unit_type(TextUnitType::Sentence)
            .text(text)
            .state(TextUnitState::New, StateRule::CoveredByProduction)
            .tpsf_id(0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_sentences_and_whitespace() {
        assert_eq!(
            units("  Hello world. bye", &[]),
            expected(&[
                (SentenceInterspace, "  "),
                (Sentence, "Hello world."),
                (SentenceInterspace, " "),
                (SentenceCandidate, "bye"),
            ])
        );
    }

    #[test]
    fn test_paragraphs() {
        assert_eq!(
            units("Title\n\nIt begins. \n", &[]),
            expected(&[
                (SentenceCandidate, "Title"),
                (ParagraphInterspace, "\n\n"),
                (Sentence, "It begins."),
                (ParagraphInterspace, " \n"),
            ])
        );
    }

    #[test]
    fn test_quoted_sentence() {
        assert_eq!(
            units("\"Run!\" (He ran.)", &[]),
            expected(&[
                (Sentence, "\"Run!\""),
                (SentenceInterspace, " "),
                (Sentence, "(He ran.)"),
            ])
        );
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(units("", &[]), Vec::new());
    }

    #[test]
    fn test_previous_sentence_needs_word_boundaries() {
        // The model doesn't split without whitespace after the full stop.
        assert_eq!(
            units("The cat sat.The dog ran.", &[sentence("The dog ran.")]),
            expected(&[(Sentence, "The cat sat.The dog ran.")])
        );
    }

    struct GluingModel;

    impl LanguageModel for GluingModel {
        fn tag_words(&self, _: &str) -> Result<Vec<TaggedWord>, LanguageModelError> { Ok(Vec::new()) }

        fn segment_text(&self, text: &str) -> Result<Vec<String>, LanguageModelError> {
            Ok(vec![text.to_owned()])
        }

        fn check_if_typo(&self, _: &str) -> Result<bool, LanguageModelError> { Ok(false) }
    }

    #[test]
    fn test_previous_sentence_is_split_out_of_glued_text() {
        let units = segment(
            "Hello world. New text here",
            &[sentence("Hello world.")],
            &GluingModel,
        )
        .unwrap()
        .into_iter()
        .map(|unit| (unit.unit_type, unit.text))
        .collect::<Vec<_>>();

        assert_eq!(
            units,
            expected(&[
                (Sentence, "Hello world."),
                (SentenceInterspace, " "),
                (SentenceCandidate, "New text here"),
            ])
        );
    }

    #[test]
    fn test_closing_quote_is_moved_back() {
        struct QuoteModel;

        impl LanguageModel for QuoteModel {
            fn tag_words(&self, _: &str) -> Result<Vec<TaggedWord>, LanguageModelError> {
                Ok(Vec::new())
            }

            fn segment_text(&self, _: &str) -> Result<Vec<String>, LanguageModelError> {
                Ok(vec!["He said \"Go.".to_owned(), "\" Then left.".to_owned()])
            }

            fn check_if_typo(&self, _: &str) -> Result<bool, LanguageModelError> { Ok(false) }
        }

        let units = segment("He said \"Go.\" Then left.", &[], &QuoteModel)
            .unwrap()
            .into_iter()
            .map(|unit| (unit.unit_type, unit.text))
            .collect::<Vec<_>>();

        assert_eq!(
            units,
            expected(&[
                (Sentence, "He said \"Go.\""),
                (SentenceInterspace, " "),
                (Sentence, "Then left."),
            ])
        );
    }

    #[test]
    fn test_lossy_segmentation_is_an_error() {
        struct LossyModel;

        impl LanguageModel for LossyModel {
            fn tag_words(&self, _: &str) -> Result<Vec<TaggedWord>, LanguageModelError> {
                Ok(Vec::new())
            }

            fn segment_text(&self, text: &str) -> Result<Vec<String>, LanguageModelError> {
                Ok(vec![text.trim().to_owned()])
            }

            fn check_if_typo(&self, _: &str) -> Result<bool, LanguageModelError> { Ok(false) }
        }

        assert_eq!(
            segment("Hi. ", &[], &LossyModel),
            Err(PipelineError::LanguageModel(
                LanguageModelError::InvalidSegmentation {
                    text: "Hi. ".to_owned()
                }
            ))
        );
    }
}
