use log::{debug, info};

use super::{
    char_buffer::{CharBuffer, OutOfRange},
    relevance::RelevanceEvaluator,
    snapshot::{Tpsf, TpsfChain},
    text_transformation::TextTransformation,
};
use crate::{
    config::PipelineConfig,
    errors::PipelineError,
    language_model::LanguageModel,
    text_units::{ContainmentMatcher, PredecessorMatcher, reconcile, segment},
    transforming_sequence::TransformingSequence,
};

/// Replays transforming sequences on an initially empty text and builds a
/// snapshot after each of them.
pub struct TpsfFactory<'a> {
    config: &'a PipelineConfig,
    model: &'a dyn LanguageModel,
    matcher: Box<dyn PredecessorMatcher>,
}

impl std::fmt::Debug for TpsfFactory<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TpsfFactory")
            .field("config", &self.config)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

/// State threaded through the replay.
#[derive(Debug, Default)]
struct ReplayAccumulator {
    buffer: CharBuffer,
    /// Irrelevant sequences since the last relevant snapshot.
    backlog: Vec<TransformingSequence>,
    chain: TpsfChain,
}

impl<'a> TpsfFactory<'a> {
    #[must_use]
    pub fn new(config: &'a PipelineConfig, model: &'a dyn LanguageModel) -> Self {
        Self {
            config,
            model,
            matcher: Box::new(ContainmentMatcher),
        }
    }

    #[must_use]
    pub fn with_matcher(self, matcher: impl PredecessorMatcher + 'static) -> Self {
        Self {
            matcher: Box::new(matcher),
            ..self
        }
    }

    /// Build the snapshot chain of `sequences`. Navigation doesn't change
    /// the text so it produces no snapshot. The snapshot of the last edit
    /// is final and always relevant.
    pub fn replay(&self, sequences: &[TransformingSequence]) -> Result<TpsfChain, PipelineError> {
        let edits = sequences
            .iter()
            .enumerate()
            .filter(|(_, sequence)| !sequence.edit.is_navigation())
            .collect::<Vec<_>>();
        let last = edits.len().checked_sub(1);

        let accumulator = edits.into_iter().enumerate().try_fold(
            ReplayAccumulator::default(),
            |accumulator, (position, (ts_index, sequence))| {
                self.step(
                    accumulator,
                    ts_index,
                    sequence.clone(),
                    Some(position) == last,
                )
            },
        )?;

        info!(
            "Replayed {} edits into {} snapshots ({} relevant)",
            sequences.len(),
            accumulator.chain.len(),
            accumulator.chain.relevant().count()
        );

        Ok(accumulator.chain)
    }

    fn step(
        &self,
        mut accumulator: ReplayAccumulator,
        ts_index: usize,
        mut sequence: TransformingSequence,
        is_final: bool,
    ) -> Result<ReplayAccumulator, PipelineError> {
        apply_edit(&mut accumulator.buffer, ts_index, &mut sequence)?;

        let text = accumulator.buffer.text();
        let revision_id = accumulator.chain.next_revision_id();
        let previous_units = accumulator
            .chain
            .last()
            .map_or(&[][..], |previous| previous.text_units.as_slice());

        let units = segment(&text, previous_units, self.model)?;
        let reconciled = reconcile(
            units,
            previous_units,
            &sequence,
            revision_id,
            self.matcher.as_ref(),
        )?;

        let units_text = reconciled
            .units
            .iter()
            .map(|unit| unit.text.as_str())
            .collect::<String>();
        if units_text != text {
            return Err(PipelineError::BrokenConcatenation { revision_id });
        }

        let evaluator = RelevanceEvaluator::new(self.config, self.model);
        let relevant = is_final || evaluator.evaluate_snapshot(&sequence, &reconciled.units)?;
        sequence.relevance = Some(relevant);

        let irrelevant_tss_aggregated = if relevant {
            std::mem::take(&mut accumulator.backlog)
        } else {
            accumulator.backlog.push(sequence.clone());
            accumulator.backlog.clone()
        };

        debug!(
            "Revision {revision_id}: {} at {}, {} units, relevant: {relevant}",
            sequence.label(),
            sequence.edit.start_pos(),
            reconciled.units.len()
        );

        let text_transformation = TextTransformation::classify(&sequence, &reconciled);
        accumulator.chain.push(Tpsf {
            revision_id,
            text,
            ts: sequence,
            previous_revision: revision_id.checked_sub(1),
            text_units: reconciled.units,
            deleted_units: reconciled.deleted,
            relevant,
            irrelevant_tss_aggregated,
            text_transformation,
            is_final,
        });

        Ok(accumulator)
    }
}

/// Apply the edit to the buffer, recording the removed text in the edit.
fn apply_edit(
    buffer: &mut CharBuffer,
    ts_index: usize,
    sequence: &mut TransformingSequence,
) -> Result<(), PipelineError> {
    let label = sequence.label();
    let desync = |error: OutOfRange| PipelineError::BufferDesync {
        ts_index,
        label,
        start_pos: error.start,
        end_pos: error.end,
        buffer_len: error.len,
    };

    let removed = match sequence.edit.removed_span() {
        Some((start_pos, end_pos)) => Some(buffer.remove(start_pos..=end_pos).map_err(desync)?),
        None => None,
    };

    // Replacements insert their text where the removed text was.
    let edit = &sequence.edit;
    if !edit.is_deletion() && !edit.is_navigation() {
        buffer
            .insert(edit.start_pos(), edit.inserted())
            .map_err(desync)?;
    }

    if let Some(removed) = removed {
        sequence.edit.set_removed(removed);
    }

    Ok(())
}
