mod burst;
mod edit;

pub use burst::{Burst, decompose};
pub use edit::Edit;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    actions::{Action, ActionGroups, ActionType, GroupKey},
    config::PipelineConfig,
    errors::PipelineError,
};

/// One edit operation made of a group of actions: what changed, where and
/// how fast it was written.
///
/// Timing fields are only set when every action of the group was timed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TransformingSequence {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub edit: Edit,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub duration: Option<f64>,
    /// Time between the end of the previous group and the start of this one.
    pub preceding_pause: Option<f64>,
    pub writing_speed_per_min: Option<f64>,
    pub avg_pause_duration: Option<f64>,
    pub bursts: Vec<Burst>,
    /// Unknown until the edit is replayed.
    pub relevance: Option<bool>,
}

impl TransformingSequence {
    /// An untimed sequence.
    #[must_use]
    pub fn new(edit: Edit) -> Self {
        Self {
            edit,
            start_time: None,
            end_time: None,
            duration: None,
            preceding_pause: None,
            writing_speed_per_min: None,
            avg_pause_duration: None,
            bursts: Vec::new(),
            relevance: None,
        }
    }

    /// Build the sequence of one action group. `previous_group_end` is the
    /// end time of the last action of the group before it.
    pub fn from_group(
        key: &GroupKey,
        actions: &[Action],
        previous_group_end: Option<f64>,
        pause_duration: f64,
    ) -> Result<Self, PipelineError> {
        let invalid = |reason| PipelineError::InvalidActionGroup {
            key: key.to_string(),
            reason,
        };

        let (Some(first), Some(last)) = (actions.first(), actions.last()) else {
            return Err(invalid("the group has no actions"));
        };
        if actions
            .iter()
            .any(|action| action.action_type != key.action_type)
        {
            return Err(invalid("the group mixes action types"));
        }

        let text = || {
            actions
                .iter()
                .map(|action| action.content.as_str())
                .collect::<String>()
        };
        let edit = match key.action_type {
            ActionType::Append => Edit::Append {
                start_pos: first.start_pos,
                text: text(),
            },
            ActionType::Insertion => Edit::Insertion {
                start_pos: first.start_pos,
                text: text(),
            },
            ActionType::Pasting => Edit::Pasting {
                start_pos: first.start_pos,
                text: text(),
            },
            ActionType::Deletion | ActionType::Midletion => {
                let start_pos = actions
                    .iter()
                    .map(|action| action.start_pos)
                    .min()
                    .unwrap_or(first.start_pos);
                let end_pos = start_pos + actions.len() - 1;

                if key.action_type == ActionType::Deletion {
                    Edit::Deletion {
                        start_pos,
                        end_pos,
                        removed: String::new(),
                    }
                } else {
                    Edit::Midletion {
                        start_pos,
                        end_pos,
                        removed: String::new(),
                    }
                }
            }
            ActionType::Replacement => {
                let (Some(first_replaced), Some(last_replaced)) =
                    (first.replaced(), last.replaced())
                else {
                    return Err(invalid("a replacement lacks its replaced span"));
                };

                Edit::Replacement {
                    start_pos: first.start_pos,
                    end_pos: last_replaced.end_pos,
                    text: text(),
                    removed: String::new(),
                    replacement_text_len: first_replaced.text_len,
                }
            }
            ActionType::Navigation => Edit::Navigation {
                start_pos: first.start_pos,
                end_pos: last.end_pos,
            },
        };

        let mut sequence = Self::new(edit);

        if sequence.edit.is_production() {
            sequence.bursts = decompose(actions, pause_duration);
        }

        if actions.iter().all(Action::is_timed) {
            sequence.set_timing(actions, previous_group_end);
        }

        Ok(sequence)
    }

    fn set_timing(&mut self, actions: &[Action], previous_group_end: Option<f64>) {
        let (Some(first), Some(last)) = (actions.first(), actions.last()) else {
            return;
        };
        let (Some(start_time), Some(last_start_time)) = (first.start_time, last.start_time) else {
            return;
        };

        let duration = last_start_time - start_time;
        let pauses = actions[1..]
            .iter()
            .filter_map(|action| action.pause)
            .collect::<Vec<_>>();

        self.start_time = Some(start_time);
        self.end_time = last.end_time;
        self.duration = Some(duration);
        self.preceding_pause = previous_group_end.map(|end| start_time - end);
        self.avg_pause_duration =
            (!pauses.is_empty()).then(|| pauses.iter().sum::<f64>() / pauses.len() as f64);
        self.writing_speed_per_min =
            (duration > 0.0).then(|| self.edit.len() as f64 / duration * 60.0);
    }

    /// Build one sequence per action group, in group order.
    pub fn build_all(
        groups: &ActionGroups,
        config: &PipelineConfig,
    ) -> Result<Vec<Self>, PipelineError> {
        let mut previous_group_end = None;

        groups
            .iter()
            .map(|(key, actions)| {
                let sequence =
                    Self::from_group(key, actions, previous_group_end, config.pause_duration)?;
                previous_group_end = actions.last().and_then(|action| action.end_time);
                Ok(sequence)
            })
            .collect()
    }

    #[must_use]
    pub fn with_relevance(self, relevance: bool) -> Self {
        Self {
            relevance: Some(relevance),
            ..self
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str { self.edit.label() }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::actions::{ReplacedSpan, aggregate};

    fn key(action_type: ActionType) -> GroupKey {
        GroupKey {
            action_type,
            index: 0,
        }
    }

    #[test]
    fn test_backspace_run_is_normalized() {
        let actions = vec![
            Action::deletion(11, 11),
            Action::deletion(10, 10),
            Action::deletion(9, 9),
            Action::deletion(8, 8),
        ];

        let sequence =
            TransformingSequence::from_group(&key(ActionType::Deletion), &actions, None, 2.0)
                .unwrap();

        assert_eq!(sequence.label(), "deletion");
        assert_eq!(
            sequence.edit,
            Edit::Deletion {
                start_pos: 8,
                end_pos: 11,
                removed: String::new()
            }
        );
    }

    #[test]
    fn test_stationary_delete_run_is_normalized() {
        let actions = vec![
            Action::midletion(4, 13),
            Action::midletion(4, 12),
            Action::midletion(4, 11),
        ];

        let sequence =
            TransformingSequence::from_group(&key(ActionType::Midletion), &actions, None, 2.0)
                .unwrap();

        assert_eq!(sequence.edit.start_pos(), 4);
        assert_eq!(sequence.edit.end_pos(), Some(6));
    }

    #[test]
    fn test_replacement_end_comes_from_the_replaced_span() {
        let replaced = ReplacedSpan {
            end_pos: 10,
            text_len: 5,
        };
        let actions = vec![Action::replacement("there", 6, replaced, 17)];

        let sequence =
            TransformingSequence::from_group(&key(ActionType::Replacement), &actions, None, 2.0)
                .unwrap();

        assert_eq!(sequence.edit.end_pos(), Some(10));
        assert_eq!(sequence.edit.replacement_text_len(), Some(5));
        assert_eq!(sequence.edit.text(), "there");
    }

    #[test]
    fn test_timing() {
        let actions = vec![
            Action::append("a", 0, 1).with_times(10.0, 10.1, Some(1.0)),
            Action::append("b", 1, 2).with_times(10.5, 10.6, Some(0.4)),
            Action::append("c", 2, 3).with_times(11.0, 11.1, Some(0.4)),
        ];

        let sequence =
            TransformingSequence::from_group(&key(ActionType::Append), &actions, Some(9.0), 2.0)
                .unwrap();

        assert_eq!(sequence.start_time, Some(10.0));
        assert_eq!(sequence.end_time, Some(11.1));
        assert_eq!(sequence.duration, Some(1.0));
        assert_eq!(sequence.preceding_pause, Some(1.0));
        assert_eq!(sequence.writing_speed_per_min, Some(180.0));
        assert_eq!(sequence.avg_pause_duration.map(|pause| (pause * 10.0).round()), Some(4.0));
    }

    #[test]
    fn test_instant_edit_has_no_speed() {
        let actions = vec![Action::pasting("Hello", 0, 5).with_times(3.0, 3.0, None)];

        let sequence =
            TransformingSequence::from_group(&key(ActionType::Pasting), &actions, None, 2.0)
                .unwrap();

        assert_eq!(sequence.duration, Some(0.0));
        assert_eq!(sequence.writing_speed_per_min, None);
        assert_eq!(sequence.preceding_pause, None);
        assert_eq!(sequence.avg_pause_duration, None);
    }

    #[test]
    fn test_mixed_timing_leaves_all_timing_empty() {
        let actions = vec![
            Action::append("a", 0, 1).with_times(1.0, 1.1, None),
            Action::append("b", 1, 2),
        ];

        let sequence =
            TransformingSequence::from_group(&key(ActionType::Append), &actions, Some(0.5), 2.0)
                .unwrap();

        assert_eq!(sequence.start_time, None);
        assert_eq!(sequence.duration, None);
        assert_eq!(sequence.preceding_pause, None);
        assert_eq!(sequence.writing_speed_per_min, None);
        assert_eq!(sequence.bursts.len(), 1);
    }

    #[test]
    fn test_invalid_groups() {
        assert_eq!(
            TransformingSequence::from_group(&key(ActionType::Append), &[], None, 2.0),
            Err(PipelineError::InvalidActionGroup {
                key: "append-0".to_owned(),
                reason: "the group has no actions"
            })
        );

        assert!(matches!(
            TransformingSequence::from_group(
                &key(ActionType::Append),
                &[Action::insertion("a", 0, 3)],
                None,
                2.0
            ),
            Err(PipelineError::InvalidActionGroup { .. })
        ));
    }

    #[test]
    fn test_build_all_links_preceding_pauses() {
        let groups = aggregate(vec![
            Action::append("a", 0, 1).with_times(0.0, 0.1, None),
            Action::append("b", 1, 2).with_times(0.2, 0.3, Some(0.1)),
            Action::deletion(1, 1).with_times(3.3, 3.4, Some(3.0)),
        ]);

        let sequences = TransformingSequence::build_all(&groups, &PipelineConfig::default()).unwrap();

        let labels = sequences.iter().map(TransformingSequence::label).collect::<Vec<_>>();
        assert_eq!(labels, vec!["append", "deletion"]);
        assert_eq!(sequences[0].preceding_pause, None);
        assert_eq!(sequences[1].preceding_pause.map(|pause| (pause * 10.0).round()), Some(30.0));
        assert_eq!(sequences[1].bursts, Vec::new());
    }
}
