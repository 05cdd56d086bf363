use log::{debug, warn};

use super::action::{Action, ActionType, ReplacedSpan};
use crate::{
    config::{PipelineConfig, SourceFormat},
    errors::RecordError,
    events::{Event, EventKind, EventLog, Key},
};

/// Offsets turning the raw document length of a log record into the length
/// the classifier works with: the length before the edit for productions and
/// the index of the last character for deletions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthCorrection {
    pub per_produced_char: isize,
    pub delete: isize,
    pub backspace: isize,
}

impl LengthCorrection {
    #[must_use]
    pub fn for_format(format: SourceFormat) -> Self {
        match format {
            // Inputlog logs the length before a deletion and counts a
            // backspace's own key press as well.
            SourceFormat::Xml => Self {
                per_produced_char: -1,
                delete: -1,
                backspace: -2,
            },
            // ScriptLog logs the length after every edit.
            SourceFormat::Csv => Self {
                per_produced_char: -1,
                delete: 0,
                backspace: 0,
            },
        }
    }
}

/// Outcome of classifying a whole log. Malformed records don't stop the
/// classification, they are collected in `skipped`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classification {
    pub actions: Vec<Action>,
    pub skipped: Vec<RecordError>,
}

#[derive(Debug, Clone)]
pub struct ActionClassifier {
    correction: LengthCorrection,
}

impl ActionClassifier {
    #[must_use]
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            correction: LengthCorrection::for_format(config.ksl_source_format),
        }
    }

    /// Turn every event of the log into at most one action. Consecutive
    /// deletions are held back until their run is over, because only the
    /// whole run tells whether it reached the end of the text.
    #[must_use]
    pub fn classify(&self, log: &EventLog) -> Classification {
        let mut classification = Classification::default();
        let mut deletion_run: Vec<Action> = Vec::new();

        for index in 0..log.len() {
            let Some((_, event, next)) = log.neighbours(index) else {
                break;
            };

            let action = match self.classify_event(index, event, next) {
                Ok(Some(action)) => action,
                Ok(None) => continue,
                Err(error) => {
                    warn!("Skipping record: {error}");
                    classification.skipped.push(error);
                    continue;
                }
            };

            if action.action_type.is_deletion() {
                let is_contiguous = deletion_run.last().is_none_or(|last| {
                    last.start_pos == action.start_pos || last.start_pos == action.start_pos + 1
                });
                if !is_contiguous {
                    close_deletion_run(&mut deletion_run, &mut classification.actions);
                }
                deletion_run.push(action);
                continue;
            }

            if let Some(last) = deletion_run.last() {
                if action.action_type.is_production() && action.start_pos == last.start_pos {
                    debug!(
                        "Production at {} right after a deletion run at the same position",
                        action.start_pos
                    );
                }
                close_deletion_run(&mut deletion_run, &mut classification.actions);
            }

            classification.actions.push(action);
        }

        close_deletion_run(&mut deletion_run, &mut classification.actions);

        classification
    }

    /// Classify a single event given the event following it. Modifier keys
    /// and the keystrokes logged right before a replacement (the replacement
    /// record already covers them) yield no action.
    pub fn classify_event(
        &self,
        index: usize,
        event: &Event,
        next: Option<&Event>,
    ) -> Result<Option<Action>, RecordError> {
        let is_text_edit = event.kind == EventKind::Insert
            || (event.kind == EventKind::Keyboard
                && (event.key == Key::Production || event.key.is_deletion()));
        if is_text_edit && next.is_some_and(Event::is_replacement) {
            return Ok(None);
        }

        let action = match event.kind {
            EventKind::Replacement => self.classify_replacement(index, event)?,
            EventKind::Insert => self.classify_production(index, event)?,
            EventKind::Keyboard => match event.key {
                Key::Production => self.classify_production(index, event)?,
                Key::Backspace | Key::Delete => self.classify_deletion(index, event)?,
                Key::Navigation(_) => {
                    Action::navigation(event.start_pos, event.end_pos, event.doc_length)
                }
                Key::Modifier(_) => return Ok(None),
            },
        };

        Ok(Some(action.with_timing_of(event)))
    }

    fn classify_production(&self, index: usize, event: &Event) -> Result<Action, RecordError> {
        let length = event.content_len();
        if length == 0 {
            return Err(RecordError::EmptyProduction { index });
        }

        let correction = self.correction.per_produced_char * length as isize;
        let length_before = adjusted_length(index, event.doc_length, correction)?;
        let text_len_after = length_before + length;

        Ok(if length > 1 {
            Action::pasting(&event.content, event.start_pos, text_len_after)
        } else if event.start_pos < length_before {
            Action::insertion(&event.content, event.start_pos, text_len_after)
        } else {
            Action::append(&event.content, event.start_pos, text_len_after)
        })
    }

    fn classify_deletion(&self, index: usize, event: &Event) -> Result<Action, RecordError> {
        let (removed_pos, correction) = if event.key == Key::Backspace {
            let removed_pos = event
                .start_pos
                .checked_sub(1)
                .ok_or(RecordError::DeletionBeforeStart { index })?;
            (removed_pos, self.correction.backspace)
        } else {
            (event.start_pos, self.correction.delete)
        };

        let last_index = adjusted_length(index, event.doc_length, correction)?;

        Ok(if removed_pos >= last_index {
            Action::deletion(removed_pos, last_index)
        } else {
            Action::midletion(removed_pos, last_index)
        })
    }

    fn classify_replacement(&self, index: usize, event: &Event) -> Result<Action, RecordError> {
        let end_pos = event
            .end_pos
            .ok_or(RecordError::MissingReplacementEnd { index })?;

        if end_pos <= event.start_pos {
            return self.classify_production(index, event);
        }

        let replaced = ReplacedSpan {
            end_pos: end_pos - 1,
            text_len: event.content_len(),
        };

        Ok(Action::replacement(
            &event.content,
            event.start_pos,
            replaced,
            event.doc_length,
        ))
    }
}

fn adjusted_length(index: usize, doc_length: usize, correction: isize) -> Result<usize, RecordError> {
    doc_length
        .checked_add_signed(correction)
        .ok_or(RecordError::InvalidLength {
            index,
            doc_length,
            correction,
        })
}

fn close_deletion_run(run: &mut Vec<Action>, actions: &mut Vec<Action>) {
    let reaches_end = run
        .iter()
        .any(|action| action.action_type == ActionType::Deletion);

    for mut action in run.drain(..) {
        action.relabel_deletion(reaches_end);
        actions.push(action);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;
    use crate::{
        actions::ActionType,
        events::{ModifierKey, NavigationKey},
    };

    fn classifier(format: SourceFormat) -> ActionClassifier {
        ActionClassifier::new(&PipelineConfig {
            ksl_source_format: format,
            ..PipelineConfig::default()
        })
    }

    fn types(classification: &Classification) -> Vec<ActionType> {
        classification
            .actions
            .iter()
            .map(|action| action.action_type)
            .collect()
    }

    #[test_case(Event::production(0, "a", 1), ActionType::Append, 1; "typing at the end")]
    #[test_case(Event::production(2, "x", 6), ActionType::Insertion, 6; "typing in the middle")]
    #[test_case(Event::insert(0, "abc", 3), ActionType::Pasting, 3; "pasting")]
    #[test_case(Event::backspace(12, 13), ActionType::Deletion, 11; "backspace at the end")]
    #[test_case(Event::delete(4, 14), ActionType::Midletion, 13; "delete in the middle")]
    #[test_case(Event::replacement(3, Some(3), "y", 6), ActionType::Insertion, 6; "empty selection")]
    fn test_classify_xml_event(event: Event, expected: ActionType, text_len_after: usize) {
        let action = classifier(SourceFormat::Xml)
            .classify_event(0, &event, None)
            .unwrap()
            .unwrap();

        assert_eq!(action.action_type, expected);
        assert_eq!(action.text_len_after, text_len_after);
    }

    #[test]
    fn test_csv_lengths() {
        let classifier = classifier(SourceFormat::Csv);

        let backspace = classifier
            .classify_event(0, &Event::backspace(9, 8), None)
            .unwrap()
            .unwrap();
        assert_eq!(backspace.action_type, ActionType::Deletion);
        assert_eq!(backspace.start_pos, 8);

        let delete = classifier
            .classify_event(0, &Event::delete(2, 8), None)
            .unwrap()
            .unwrap();
        assert_eq!(delete.action_type, ActionType::Midletion);
    }

    #[test]
    fn test_replacement() {
        let action = classifier(SourceFormat::Xml)
            .classify_event(0, &Event::replacement(6, Some(11), "there", 17), None)
            .unwrap()
            .unwrap();

        assert_eq!(action.action_type, ActionType::Replacement);
        assert_eq!(action.end_pos, Some(10));
        assert_eq!(
            action.replaced(),
            Some(ReplacedSpan {
                end_pos: 10,
                text_len: 5
            })
        );
    }

    #[test]
    fn test_ignored_events() {
        let classifier = classifier(SourceFormat::Xml);
        let replacement = Event::replacement(0, Some(2), "x", 3);

        assert_eq!(
            classifier.classify_event(0, &Event::modifier(ModifierKey::Shift, 0, 0), None),
            Ok(None)
        );
        assert_eq!(
            classifier.classify_event(0, &Event::production(0, "x", 5), Some(&replacement)),
            Ok(None)
        );
        assert_eq!(
            classifier.classify_event(0, &Event::backspace(2, 5), Some(&replacement)),
            Ok(None)
        );
    }

    #[test]
    fn test_malformed_records() {
        let classifier = classifier(SourceFormat::Xml);

        assert_eq!(
            classifier.classify_event(3, &Event::replacement(0, None, "x", 3), None),
            Err(RecordError::MissingReplacementEnd { index: 3 })
        );
        assert_eq!(
            classifier.classify_event(0, &Event::backspace(0, 2), None),
            Err(RecordError::DeletionBeforeStart { index: 0 })
        );
        assert_eq!(
            classifier.classify_event(1, &Event::production(0, "a", 0), None),
            Err(RecordError::InvalidLength {
                index: 1,
                doc_length: 0,
                correction: -1
            })
        );
        assert_eq!(
            classifier.classify_event(2, &Event::production(0, "", 4), None),
            Err(RecordError::EmptyProduction { index: 2 })
        );
    }

    #[test]
    fn test_skipped_records_do_not_stop_classification() {
        let log = EventLog::new(vec![
            Event::production(0, "a", 1),
            Event::backspace(0, 2),
            Event::production(1, "b", 2),
        ]);

        let classification = classifier(SourceFormat::Xml).classify(&log);

        assert_eq!(
            types(&classification),
            vec![ActionType::Append, ActionType::Append]
        );
        assert_eq!(
            classification.skipped,
            vec![RecordError::DeletionBeforeStart { index: 1 }]
        );
    }

    #[test]
    fn test_backspace_run() {
        let log = EventLog::new(vec![
            Event::backspace(12, 13),
            Event::backspace(11, 12),
            Event::backspace(10, 11),
            Event::production(9, "x", 10),
        ]);

        let classification = classifier(SourceFormat::Xml).classify(&log);

        assert_eq!(
            types(&classification),
            vec![
                ActionType::Deletion,
                ActionType::Deletion,
                ActionType::Deletion,
                ActionType::Append
            ]
        );
        let positions = classification
            .actions
            .iter()
            .map(|action| action.start_pos)
            .collect::<Vec<_>>();
        assert_eq!(positions, vec![11, 10, 9, 9]);
    }

    #[test]
    fn test_delete_run_reaching_the_end_is_a_deletion() {
        let log = EventLog::new(vec![Event::delete(1, 3), Event::delete(1, 2)]);

        let classification = classifier(SourceFormat::Xml).classify(&log);

        assert_eq!(
            types(&classification),
            vec![ActionType::Deletion, ActionType::Deletion]
        );
    }

    #[test]
    fn test_deletion_runs_split_at_gaps_and_navigation() {
        let log = EventLog::new(vec![
            Event::delete(4, 14),
            Event::delete(4, 13),
            Event::backspace(9, 13),
            Event::navigation(NavigationKey::Mouse, 8, Some(2), 12),
            Event::delete(2, 12),
        ]);

        let classification = classifier(SourceFormat::Xml).classify(&log);

        assert_eq!(
            types(&classification),
            vec![
                ActionType::Midletion,
                ActionType::Midletion,
                ActionType::Midletion,
                ActionType::Navigation,
                ActionType::Midletion
            ]
        );
    }
}
