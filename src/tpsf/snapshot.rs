#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::text_transformation::TextTransformation;
use crate::{text_units::TextUnit, transforming_sequence::TransformingSequence};

/// The text produced so far: the full text right after one edit, segmented
/// into text units.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Tpsf {
    pub revision_id: usize,
    pub text: String,
    /// The edit that produced this snapshot.
    pub ts: TransformingSequence,
    pub previous_revision: Option<usize>,
    pub text_units: Vec<TextUnit>,
    /// Sentences of the previous snapshot that this edit removed.
    pub deleted_units: Vec<TextUnit>,
    pub relevant: bool,
    /// The irrelevant edits since the previous relevant snapshot.
    pub irrelevant_tss_aggregated: Vec<TransformingSequence>,
    pub text_transformation: TextTransformation,
    pub is_final: bool,
}

impl Tpsf {
    /// The concatenated text of the units, which must equal `text`.
    #[must_use]
    pub fn units_text(&self) -> String {
        self.text_units
            .iter()
            .map(|unit| unit.text.as_str())
            .collect()
    }
}

/// Snapshots in revision order, indexed by their `revision_id`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TpsfChain {
    tpsfs: Vec<Tpsf>,
}

impl TpsfChain {
    #[must_use]
    pub fn get(&self, revision_id: usize) -> Option<&Tpsf> { self.tpsfs.get(revision_id) }

    /// The snapshot the given revision was built on.
    #[must_use]
    pub fn previous(&self, revision_id: usize) -> Option<&Tpsf> {
        revision_id
            .checked_sub(1)
            .and_then(|previous| self.get(previous))
    }

    #[must_use]
    pub fn last(&self) -> Option<&Tpsf> { self.tpsfs.last() }

    #[must_use]
    pub fn final_text(&self) -> &str { self.last().map_or("", |tpsf| tpsf.text.as_str()) }

    #[must_use]
    pub fn len(&self) -> usize { self.tpsfs.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.tpsfs.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, Tpsf> { self.tpsfs.iter() }

    /// Only the snapshots produced by relevant edits.
    pub fn relevant(&self) -> impl Iterator<Item = &Tpsf> {
        self.tpsfs.iter().filter(|tpsf| tpsf.relevant)
    }

    /// The id the next pushed snapshot will get.
    pub(crate) fn next_revision_id(&self) -> usize { self.tpsfs.len() }

    pub(crate) fn push(&mut self, tpsf: Tpsf) {
        debug_assert_eq!(tpsf.revision_id, self.tpsfs.len());
        self.tpsfs.push(tpsf);
    }
}

impl<'a> IntoIterator for &'a TpsfChain {
    type Item = &'a Tpsf;
    type IntoIter = std::slice::Iter<'a, Tpsf>;

    fn into_iter(self) -> Self::IntoIter { self.tpsfs.iter() }
}
