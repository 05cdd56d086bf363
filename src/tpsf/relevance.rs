use crate::{
    config::PipelineConfig,
    errors::PipelineError,
    language_model::LanguageModel,
    text_units::{TextUnit, TextUnitState},
    transforming_sequence::TransformingSequence,
    utils::{char_slice::char_len, punctuation::contains_punctuation},
};

/// Tells substantive edits apart from noise such as typo fixes and
/// mid-word corrections.
#[derive(Clone, Copy)]
pub struct RelevanceEvaluator<'a> {
    config: &'a PipelineConfig,
    model: &'a dyn LanguageModel,
}

impl std::fmt::Debug for RelevanceEvaluator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelevanceEvaluator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> RelevanceEvaluator<'a> {
    #[must_use]
    pub fn new(config: &'a PipelineConfig, model: &'a dyn LanguageModel) -> Self {
        Self { config, model }
    }

    /// Judge the edit alone. `edit_len` counts the inserted and removed
    /// characters, the token count their words.
    pub fn evaluate_ts(&self, sequence: &TransformingSequence) -> Result<bool, PipelineError> {
        let inserted = sequence.edit.inserted();
        let removed = sequence.edit.removed();

        if self.config.include_punctuation_edits
            && (contains_punctuation(inserted) || contains_punctuation(removed))
        {
            return Ok(true);
        }

        let edit_len = char_len(inserted) + char_len(removed);
        let token_count = self.count_words(inserted)? + self.count_words(removed)?;

        let is_long_enough = edit_len >= self.config.min_edit_distance;
        let has_enough_tokens = token_count >= self.config.ts_min_tokens_number;

        Ok(if self.config.combine_edit_distance_with_tok_number {
            is_long_enough && has_enough_tokens
        } else {
            is_long_enough || has_enough_tokens
        })
    }

    /// Judge the snapshot produced by the edit: on top of the edit being
    /// relevant, with spellchecking enabled a typo in any changed sentence
    /// makes it irrelevant.
    pub fn evaluate_snapshot(
        &self,
        sequence: &TransformingSequence,
        units: &[TextUnit],
    ) -> Result<bool, PipelineError> {
        if !self.evaluate_ts(sequence)? {
            return Ok(false);
        }
        if !self.config.enable_spellchecking {
            return Ok(true);
        }

        let changed = units.iter().filter(|unit| {
            unit.unit_type.is_sentence_like()
                && matches!(
                    unit.state,
                    TextUnitState::New | TextUnitState::Modified | TextUnitState::Split
                )
        });

        for unit in changed {
            for word in self.model.tag_words(&unit.text)? {
                if word.is_word() && self.model.check_if_typo(&word.text)? {
                    return Ok(false);
                }
            }
        }

        Ok(true)
    }

    fn count_words(&self, text: &str) -> Result<usize, PipelineError> {
        if text.is_empty() {
            return Ok(0);
        }

        Ok(self
            .model
            .tag_words(text)?
            .iter()
            .filter(|word| word.is_word())
            .count())
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{
        config::Language,
        language_model::RuleBasedModel,
        text_units::{StateRule, TextUnitType},
        transforming_sequence::Edit,
    };

    fn insertion(text: &str) -> TransformingSequence {
        TransformingSequence::new(Edit::Insertion {
            start_pos: 0,
            text: text.to_owned(),
        })
    }

    fn deletion(removed: &str) -> TransformingSequence {
        let mut sequence = TransformingSequence::new(Edit::Midletion {
            start_pos: 0,
            end_pos: removed.chars().count() - 1,
            removed: String::new(),
        });
        sequence.edit.set_removed(removed.to_owned());
        sequence
    }

    fn config(combine: bool, punctuation: bool) -> PipelineConfig {
        PipelineConfig {
            min_edit_distance: 3,
            ts_min_tokens_number: 2,
            combine_edit_distance_with_tok_number: combine,
            include_punctuation_edits: punctuation,
            ..PipelineConfig::default()
        }
    }

    #[test_case(insertion("a"), false, true, false; "single letter")]
    #[test_case(insertion("abcd"), false, true, true; "long enough")]
    #[test_case(insertion("abcd"), true, true, false; "long enough but a single token")]
    #[test_case(insertion("ab cd"), true, true, true; "long enough with two tokens")]
    #[test_case(insertion(","), false, true, true; "punctuation")]
    #[test_case(insertion(","), false, false, false; "punctuation not included")]
    #[test_case(deletion("the"), false, true, true; "removed word")]
    #[test_case(deletion(" "), true, false, false; "removed space")]
    fn test_evaluate_ts(
        sequence: TransformingSequence,
        combine: bool,
        punctuation: bool,
        expected: bool,
    ) {
        let config = config(combine, punctuation);
        let model = RuleBasedModel::new(Language::English);

        let evaluator = RelevanceEvaluator::new(&config, &model);

        assert_eq!(evaluator.evaluate_ts(&sequence), Ok(expected));
    }

    #[test]
    fn test_typo_makes_snapshot_irrelevant() {
        let config = PipelineConfig {
            enable_spellchecking: true,
            ..PipelineConfig::default()
        };
        let model = RuleBasedModel::new(Language::English).with_lexicon(["the", "cat", "sat"]);
        let evaluator = RelevanceEvaluator::new(&config, &model);

        let unit = |text: &str, state| {
            TextUnit::builder()
                .unit_type(TextUnitType::Sentence)
                .text(text)
                .state(state, StateRule::Fallback)
                .tpsf_id(0)
                .build()
                .unwrap()
        };

        let relevant = insertion("cat sat");
        let irrelevant = deletion(" ");

        assert_eq!(
            evaluator.evaluate_snapshot(&relevant, &[unit("The cat sat.", TextUnitState::Modified)]),
            Ok(true)
        );
        assert_eq!(
            evaluator.evaluate_snapshot(&relevant, &[unit("The kat sat.", TextUnitState::Modified)]),
            Ok(false)
        );
        assert_eq!(
            evaluator.evaluate_snapshot(&relevant, &[unit(
                "The kat sat.",
                TextUnitState::UnchangedPre
            )]),
            Ok(true)
        );
        assert_eq!(
            evaluator.evaluate_snapshot(&irrelevant, &[unit("The cat sat.", TextUnitState::New)]),
            Ok(false)
        );
    }
}
