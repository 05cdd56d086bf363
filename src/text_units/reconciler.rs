use log::debug;

use super::{
    predecessor::{MatchQuery, PredecessorMatcher},
    segmenter::SegmentedUnit,
    text_unit::{StateRule, TextUnit, TextUnitState},
};
use crate::{
    errors::PipelineError, transforming_sequence::TransformingSequence,
    utils::char_slice::char_len,
};

/// The units of a snapshot with their states, plus the sentences of the
/// previous snapshot that no longer exist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconciled {
    pub units: Vec<TextUnit>,
    pub deleted: Vec<TextUnit>,
}

/// Position of a unit relative to the text produced by the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    BeforeEdit,
    Impacted,
    AfterEdit,
}

/// The part of the current text produced by the edit. Deletions produce an
/// empty region at the position of the removed text.
fn edit_region(sequence: &TransformingSequence) -> (usize, usize) {
    let start = sequence.edit.start_pos();
    (start, start + char_len(sequence.edit.inserted()))
}

fn placement(
    unit_start: usize,
    unit_end: usize,
    (region_start, region_end): (usize, usize),
    is_verbatim: bool,
) -> Placement {
    let is_touching = region_start == region_end
        && (unit_start == region_start || unit_end == region_start);

    if is_touching && !is_verbatim {
        Placement::Impacted
    } else if unit_end <= region_start {
        Placement::BeforeEdit
    } else if unit_start >= region_end {
        Placement::AfterEdit
    } else {
        Placement::Impacted
    }
}

/// Assign each unit of the current snapshot its state relative to the units
/// of the previous snapshot, trying the rules in order:
///
/// 1. before the edit and unchanged: `UnchangedPre`
/// 2. after the edit and unchanged: `UnchangedPost`
/// 3. after the edit but changed: `Split`
/// 4. entirely produced by the edit: `New`
/// 5. starts with the produced text and the rest is part of an earlier
///    previous unit: `Split`
/// 6. anything else: `Modified`, or `Split` without a predecessor when the
///    unit it came from is already continued by an earlier unit
pub fn reconcile(
    units: Vec<SegmentedUnit>,
    previous_units: &[TextUnit],
    sequence: &TransformingSequence,
    tpsf_id: usize,
    matcher: &dyn PredecessorMatcher,
) -> Result<Reconciled, PipelineError> {
    let region = edit_region(sequence);
    let inserted = sequence.edit.inserted();
    let unit_count_grew = units.len() > previous_units.len();
    let mut claimed = vec![false; previous_units.len()];

    let mut offsets = Vec::with_capacity(units.len());
    let mut offset = 0;
    for unit in &units {
        offsets.push(offset);
        offset += char_len(&unit.text);
    }

    // Unchanged units first, so that the matcher only sees what is left.
    let mut decisions: Vec<Option<(TextUnitState, StateRule, Option<usize>)>> =
        vec![None; units.len()];
    for (i, unit) in units.iter().enumerate() {
        let unit_end = offsets[i] + char_len(&unit.text);
        let verbatim = find_verbatim(previous_units, &claimed, unit, i, units.len(), false);

        match placement(offsets[i], unit_end, region, verbatim.is_some()) {
            Placement::BeforeEdit => {
                let Some(j) = verbatim else { continue };
                claimed[j] = true;
                decisions[i] = Some((
                    TextUnitState::UnchangedPre,
                    StateRule::VerbatimBefore,
                    Some(j),
                ));
            }
            Placement::AfterEdit => {
                let Some(j) = find_verbatim(previous_units, &claimed, unit, i, units.len(), true)
                else {
                    continue;
                };
                claimed[j] = true;
                decisions[i] = Some((
                    TextUnitState::UnchangedPost,
                    StateRule::VerbatimAfter,
                    Some(j),
                ));
            }
            Placement::Impacted => {}
        }
    }

    let mut result = Vec::with_capacity(units.len());
    for (i, unit) in units.iter().enumerate() {
        let (state, rule, predecessor) = if let Some(decision) = decisions[i] {
            decision
        } else {
            let unit_end = offsets[i] + char_len(&unit.text);
            let (state, rule) = match placement(offsets[i], unit_end, region, false) {
                Placement::AfterEdit => (TextUnitState::Split, StateRule::SplitRemainder),
                _ if sequence.edit.is_production()
                    && region.0 <= offsets[i]
                    && unit_end <= region.1 =>
                {
                    (TextUnitState::New, StateRule::CoveredByProduction)
                }
                _ if !unit_count_grew
                    && is_split_by_leading_fragment(unit, inserted, previous_units) =>
                {
                    (TextUnitState::Split, StateRule::SplitByLeadingFragment)
                }
                _ => (TextUnitState::Modified, StateRule::Fallback),
            };

            let (state, rule, predecessor) = if state == TextUnitState::New {
                (state, rule, None)
            } else {
                let query = MatchQuery {
                    unit,
                    unit_start: offsets[i],
                    inserted: region,
                    removed: sequence.edit.removed(),
                    previous_units,
                    claimed: &claimed,
                };
                match matcher.find_predecessor(&query) {
                    Some(j) => (state, rule, Some(j)),
                    None if state == TextUnitState::Modified
                        && is_split_off_claimed(matcher, &query) =>
                    {
                        (TextUnitState::Split, StateRule::SplitOffContinued, None)
                    }
                    None => {
                        if unit.unit_type.is_sentence_like() {
                            debug!("No predecessor found for {:?} ({rule:?})", unit.text);
                        }
                        (state, rule, None)
                    }
                }
            };

            if let Some(j) = predecessor {
                claimed[j] = true;
            }

            (state, rule, predecessor)
        };

        result.push(
            TextUnit::builder()
                .unit_type(unit.unit_type)
                .text(unit.text.clone())
                .state(state, rule)
                .tpsf_id(tpsf_id)
                .predecessor(predecessor)
                .build()?,
        );
    }

    let deleted = previous_units
        .iter()
        .enumerate()
        .filter(|(j, unit)| !claimed[*j] && unit.unit_type.is_sentence_like())
        .map(|(j, unit)| {
            TextUnit::builder()
                .unit_type(unit.unit_type)
                .text(unit.text.clone())
                .state(TextUnitState::Deleted, StateRule::Vanished)
                .tpsf_id(tpsf_id)
                .predecessor(Some(j))
                .build()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Reconciled {
        units: result,
        deleted,
    })
}

/// Index of an unclaimed previous unit with the same text, preferring the
/// one at the same position counted from the front (or from the back when
/// `from_back_first` is set).
fn find_verbatim(
    previous_units: &[TextUnit],
    claimed: &[bool],
    unit: &SegmentedUnit,
    index: usize,
    unit_count: usize,
    from_back_first: bool,
) -> Option<usize> {
    let matches = |j: &usize| {
        previous_units
            .get(*j)
            .is_some_and(|previous| !claimed[*j] && previous.text == unit.text)
    };

    let from_front = Some(index);
    let from_back = (index + previous_units.len()).checked_sub(unit_count);
    let (first, second) = if from_back_first {
        (from_back, from_front)
    } else {
        (from_front, from_back)
    };

    first
        .filter(matches)
        .or_else(|| second.filter(matches))
        .or_else(|| (0..previous_units.len()).find(matches))
}

/// The only previous unit the unit could have come from is already continued
/// by an earlier unit of this snapshot.
fn is_split_off_claimed(matcher: &dyn PredecessorMatcher, query: &MatchQuery<'_>) -> bool {
    let unclaimed = vec![false; query.previous_units.len()];
    let unrestricted = MatchQuery {
        claimed: &unclaimed,
        ..*query
    };

    matcher
        .find_predecessor(&unrestricted)
        .is_some_and(|j| query.claimed[j])
}

/// The unit starts with the text produced by the edit, and what follows is
/// found inside a previous unit other than the last one.
fn is_split_by_leading_fragment(
    unit: &SegmentedUnit,
    inserted: &str,
    previous_units: &[TextUnit],
) -> bool {
    if inserted.is_empty() {
        return false;
    }

    let Some(remainder) = unit.text.strip_prefix(inserted) else {
        return false;
    };
    let remainder = remainder.trim();
    if remainder.is_empty() {
        return false;
    }

    let Some((_, earlier)) = previous_units.split_last() else {
        return false;
    };

    earlier
        .iter()
        .any(|previous| previous.unit_type.is_sentence_like() && previous.text.contains(remainder))
}
