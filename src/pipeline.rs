use log::{error, info};
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    actions::{ActionClassifier, aggregate},
    config::PipelineConfig,
    errors::{PipelineError, RecordError},
    events::{Event, EventLog},
    language_model::LanguageModel,
    sentence_history::SentenceHistory,
    tpsf::{TpsfChain, TpsfFactory},
    transforming_sequence::TransformingSequence,
};

/// Everything reconstructed from the keystroke log of one document.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentHistory {
    pub tpsfs: TpsfChain,
    pub sentence_history: SentenceHistory,
    /// Log records that couldn't be interpreted and were left out.
    pub skipped_records: Vec<RecordError>,
}

impl DocumentHistory {
    #[must_use]
    pub fn final_text(&self) -> &str { self.tpsfs.final_text() }
}

/// Outcome of one document of a batch.
#[derive(Debug)]
pub struct DocumentReport {
    pub name: String,
    pub result: Result<DocumentHistory, PipelineError>,
}

/// Run the whole pipeline on the events of one document.
pub fn process_document(
    events: Vec<Event>,
    config: &PipelineConfig,
    model: &dyn LanguageModel,
) -> Result<DocumentHistory, PipelineError> {
    let log = EventLog::new(events);
    let classification = ActionClassifier::new(config).classify(&log);
    let groups = aggregate(classification.actions);
    let sequences = TransformingSequence::build_all(&groups, config)?;

    let tpsfs = TpsfFactory::new(config, model).replay(&sequences)?;
    let sentence_history = SentenceHistory::from_chain(&tpsfs);

    info!(
        "Processed {} events into {} edits, {} snapshots and {} sentences ({} records skipped)",
        log.len(),
        sequences.len(),
        tpsfs.len(),
        sentence_history.len(),
        classification.skipped.len()
    );

    Ok(DocumentHistory {
        tpsfs,
        sentence_history,
        skipped_records: classification.skipped,
    })
}

/// Process independent documents in parallel. A failing document is
/// reported without affecting the others.
pub fn process_documents(
    documents: Vec<(String, Vec<Event>)>,
    config: &PipelineConfig,
    model: &dyn LanguageModel,
) -> Vec<DocumentReport> {
    documents
        .into_par_iter()
        .map(|(name, events)| {
            let result = process_document(events, config, model);
            if let Err(error) = &result {
                error!("Failed to process {name}: {error}");
            }

            DocumentReport { name, result }
        })
        .collect()
}
