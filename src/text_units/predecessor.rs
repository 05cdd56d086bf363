use std::fmt::Debug;

use log::debug;

use super::{segmenter::SegmentedUnit, text_unit::TextUnit};
use crate::utils::char_slice::char_len;

/// Where a changed unit sits and what changed around it.
#[derive(Debug, Clone, Copy)]
pub struct MatchQuery<'a> {
    pub unit: &'a SegmentedUnit,
    /// Character offset of the unit in the current text.
    pub unit_start: usize,
    /// Characters `start..end` of the current text were produced by the edit.
    pub inserted: (usize, usize),
    /// Text removed by the edit at the start of `inserted`.
    pub removed: &'a str,
    pub previous_units: &'a [TextUnit],
    /// Previous units already linked to a current unit.
    pub claimed: &'a [bool],
}

/// Links a modified or split unit to the unit of the previous snapshot it
/// evolved from.
pub trait PredecessorMatcher: Debug + Send + Sync {
    /// Index into `query.previous_units`, if any unit matches.
    fn find_predecessor(&self, query: &MatchQuery<'_>) -> Option<usize>;
}

/// Undoes the edit on the unit and looks for the previous unit containing
/// the result, or contained in it. The longest candidate wins; without any
/// candidate the previous unit at the edit position is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainmentMatcher;

impl ContainmentMatcher {
    /// The unit's text as it would have been before the edit.
    #[must_use]
    pub fn reconstruct(query: &MatchQuery<'_>) -> String {
        let unit_start = query.unit_start;
        let unit_end = unit_start + char_len(&query.unit.text);
        let (inserted_start, inserted_end) = query.inserted;

        let overlap_start = inserted_start.clamp(unit_start, unit_end) - unit_start;
        let overlap_end = inserted_end.clamp(unit_start, unit_end) - unit_start;

        let mut result = String::with_capacity(query.unit.text.len() + query.removed.len());
        for (i, c) in query.unit.text.chars().enumerate() {
            if i == overlap_start && (unit_start..=unit_end).contains(&inserted_start) {
                result.push_str(query.removed);
            }
            if !(overlap_start..overlap_end).contains(&i) {
                result.push(c);
            }
        }
        if overlap_start == char_len(&query.unit.text)
            && (unit_start..=unit_end).contains(&inserted_start)
        {
            result.push_str(query.removed);
        }

        result
    }

    fn fallback(query: &MatchQuery<'_>) -> Option<usize> {
        let position = query.inserted.0;
        let mut offset = 0;

        for (j, unit) in query.previous_units.iter().enumerate() {
            let start = offset;
            offset += unit.char_len();

            let is_candidate = !query.claimed[j]
                && unit.unit_type.is_interspace() == query.unit.unit_type.is_interspace();
            if is_candidate && (start..=offset).contains(&position) {
                return Some(j);
            }
        }

        None
    }
}

impl PredecessorMatcher for ContainmentMatcher {
    fn find_predecessor(&self, query: &MatchQuery<'_>) -> Option<usize> {
        let reconstructed = Self::reconstruct(query);
        if reconstructed.is_empty() {
            return Self::fallback(query);
        }

        let candidates = query
            .previous_units
            .iter()
            .enumerate()
            .filter(|(j, unit)| {
                !query.claimed[*j]
                    && unit.unit_type.is_interspace() == query.unit.unit_type.is_interspace()
                    && (unit.text.contains(&reconstructed) || reconstructed.contains(&unit.text))
            })
            .collect::<Vec<_>>();

        if candidates.is_empty() {
            return Self::fallback(query);
        }

        if let Some((j, _)) = candidates
            .iter()
            .find(|(_, unit)| unit.text == reconstructed)
        {
            return Some(*j);
        }

        let longest = candidates.iter().map(|(_, unit)| unit.char_len()).max()?;
        let mut longest_candidates = candidates
            .iter()
            .filter(|(_, unit)| unit.char_len() == longest);

        let (j, _) = longest_candidates.next()?;
        if candidates.len() > 1 {
            debug!(
                "{} previous units match {:?}, picking {:?}",
                candidates.len(),
                reconstructed,
                query.previous_units[*j].text
            );
        }

        Some(*j)
    }
}
