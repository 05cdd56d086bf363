use std::fmt::Display;

use indexmap::IndexMap;
use log::warn;

use super::action::{Action, ActionType};

/// Identifies a group of actions: its type and a counter over all groups of
/// the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub action_type: ActionType,
    pub index: usize,
}

impl Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.action_type, self.index)
    }
}

/// The rules deciding whether an action opens a new group, in the order
/// they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingRule {
    First,
    TypeChange,
    NeverAggregated,
    PositionJump,
    AdjacentRun,
    /// Delete-key presses remove characters without moving the cursor.
    StationaryDeletion,
    PolicyViolation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupingDecision {
    pub rule: GroupingRule,
    pub starts_group: bool,
}

impl GroupingDecision {
    fn new_group(rule: GroupingRule) -> Self {
        Self {
            rule,
            starts_group: true,
        }
    }

    fn same_group(rule: GroupingRule) -> Self {
        Self {
            rule,
            starts_group: false,
        }
    }
}

/// Decide whether `current` continues the group of `previous`.
#[must_use]
pub fn decide(previous: Option<&Action>, current: &Action) -> GroupingDecision {
    let Some(previous) = previous else {
        return GroupingDecision::new_group(GroupingRule::First);
    };

    if previous.action_type != current.action_type {
        return GroupingDecision::new_group(GroupingRule::TypeChange);
    }

    if current.action_type.is_never_aggregated() {
        return GroupingDecision::new_group(GroupingRule::NeverAggregated);
    }

    let delta = current.start_pos.abs_diff(previous.start_pos);
    let is_stationary_deletion = current.action_type.is_deletion()
        && delta == 0
        && current.text_len_after < previous.text_len_after;

    match delta {
        0 if is_stationary_deletion => GroupingDecision::same_group(GroupingRule::StationaryDeletion),
        1 => GroupingDecision::same_group(GroupingRule::AdjacentRun),
        2.. => GroupingDecision::new_group(GroupingRule::PositionJump),
        _ => {
            warn!(
                "Cannot group {} at {} after {} at {}, keeping it on its own",
                current.action_type, current.start_pos, previous.action_type, previous.start_pos
            );
            GroupingDecision::new_group(GroupingRule::PolicyViolation)
        }
    }
}

/// Actions grouped into runs of contiguous edits of the same type, in the
/// order the groups were opened.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActionGroups {
    groups: IndexMap<GroupKey, Vec<Action>>,
}

impl ActionGroups {
    #[must_use]
    pub fn len(&self) -> usize { self.groups.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.groups.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &Vec<Action>)> { self.groups.iter() }

    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> { self.groups.keys() }

    #[must_use]
    pub fn get(&self, key: &GroupKey) -> Option<&Vec<Action>> { self.groups.get(key) }
}

impl IntoIterator for ActionGroups {
    type Item = (GroupKey, Vec<Action>);
    type IntoIter = indexmap::map::IntoIter<GroupKey, Vec<Action>>;

    fn into_iter(self) -> Self::IntoIter { self.groups.into_iter() }
}

/// Group the actions in a single left-to-right pass.
#[must_use]
pub fn aggregate(actions: impl IntoIterator<Item = Action>) -> ActionGroups {
    let mut groups: IndexMap<GroupKey, Vec<Action>> = IndexMap::new();
    let mut current_key: Option<GroupKey> = None;

    for action in actions {
        let previous = current_key
            .as_ref()
            .and_then(|key| groups.get(key))
            .and_then(|group| group.last());

        let decision = decide(previous, &action);

        let key = match current_key {
            Some(key) if !decision.starts_group => key,
            _ => {
                let key = GroupKey {
                    action_type: action.action_type,
                    index: groups.len(),
                };
                current_key = Some(key);
                key
            }
        };

        groups.entry(key).or_default().push(action);
    }

    ActionGroups { groups }
}
