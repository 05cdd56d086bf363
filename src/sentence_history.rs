mod builder;
mod sentence_version;

pub use builder::SentenceHistoryBuilder;
use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
pub use sentence_version::{EditingStage, LocalEdit, SentenceId, SentenceVersion};

use crate::tpsf::TpsfChain;

/// Every sentence ever written, in order of first appearance, with the
/// versions it went through.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SentenceHistory {
    timelines: IndexMap<SentenceId, Vec<SentenceVersion>>,
}

impl SentenceHistory {
    pub(crate) fn new(timelines: IndexMap<SentenceId, Vec<SentenceVersion>>) -> Self {
        Self { timelines }
    }

    #[must_use]
    pub fn from_chain(chain: &TpsfChain) -> Self {
        let mut builder = SentenceHistoryBuilder::default();
        for tpsf in chain {
            builder.push(tpsf);
        }
        builder.finish()
    }

    #[must_use]
    pub fn get(&self, id: &SentenceId) -> Option<&[SentenceVersion]> {
        self.timelines.get(id).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SentenceId, &[SentenceVersion])> {
        self.timelines
            .iter()
            .map(|(id, versions)| (id, versions.as_slice()))
    }

    /// The last text of every sentence that wasn't deleted.
    #[must_use]
    pub fn final_sentences(&self) -> Vec<&str> {
        self.timelines
            .values()
            .filter_map(|versions| versions.last())
            .filter(|version| !version.is_deleted())
            .map(|version| version.text.as_str())
            .collect()
    }

    /// Number of sentences.
    #[must_use]
    pub fn len(&self) -> usize { self.timelines.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.timelines.is_empty() }
}
