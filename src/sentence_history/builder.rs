use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;

use super::{
    SentenceHistory,
    sentence_version::{EditingStage, LocalEdit, SentenceId, SentenceVersion},
};
use crate::{
    text_units::{TextUnit, TextUnitState, TextUnitType},
    tpsf::Tpsf,
};

/// Follows the sentences through the snapshots, which have to be pushed in
/// revision order.
#[derive(Debug, Clone, Default)]
pub struct SentenceHistoryBuilder {
    timelines: IndexMap<SentenceId, Vec<SentenceVersion>>,
    /// The sentence of each text unit of the last pushed snapshot.
    previous_ids: Vec<Option<SentenceId>>,
}

impl SentenceHistoryBuilder {
    pub fn push(&mut self, tpsf: &Tpsf) {
        let mut ids = Vec::with_capacity(tpsf.text_units.len());
        let mut continued = HashSet::new();

        for unit in &tpsf.text_units {
            if unit.unit_type.is_interspace() {
                ids.push(None);
                continue;
            }

            let id = match self.inherited_id(unit) {
                Some(id) if !continued.contains(&id) => id,
                Some(id) => {
                    debug!("Sentence {id} continues in several units, {:?} starts a new one", unit.text);
                    SentenceId::new()
                }
                None => {
                    if unit.state == TextUnitState::Modified {
                        debug!("{:?} was modified but has no predecessor", unit.text);
                    }
                    SentenceId::new()
                }
            };

            continued.insert(id);
            self.record(id, tpsf.revision_id, unit);
            ids.push(Some(id));
        }

        for unit in &tpsf.deleted_units {
            let Some(id) = self.inherited_id(unit) else {
                debug!("Deleted unit {:?} was never tracked", unit.text);
                continue;
            };
            if !continued.contains(&id) {
                self.record(id, tpsf.revision_id, unit);
            }
        }

        self.previous_ids = ids;
    }

    #[must_use]
    pub fn finish(self) -> SentenceHistory { SentenceHistory::new(self.timelines) }

    fn inherited_id(&self, unit: &TextUnit) -> Option<SentenceId> {
        match unit.state {
            TextUnitState::UnchangedPre
            | TextUnitState::UnchangedPost
            | TextUnitState::Modified
            | TextUnitState::Split
            | TextUnitState::Deleted => unit
                .predecessor
                .and_then(|index| self.previous_ids.get(index).copied().flatten()),
            TextUnitState::New => None,
        }
    }

    fn record(&mut self, id: SentenceId, revision_id: usize, unit: &TextUnit) {
        let timeline = self.timelines.entry(id).or_default();
        let is_deleted = unit.state == TextUnitState::Deleted;

        let last = timeline.last();
        if last.is_some_and(|last| !last.is_deleted() && !is_deleted && last.text == unit.text) {
            return;
        }

        let edit = if is_deleted {
            LocalEdit::between(&unit.text, "")
        } else {
            LocalEdit::between(last.map_or("", |last| last.text.as_str()), &unit.text)
        };
        let stage = if timeline
            .iter()
            .any(|version| version.unit_type == TextUnitType::Sentence)
        {
            EditingStage::PostCompletion
        } else {
            EditingStage::PreCompletion
        };

        timeline.push(SentenceVersion {
            revision_id,
            text: unit.text.clone(),
            unit_type: unit.unit_type,
            state: unit.state,
            edit,
            stage,
        });
    }
}
