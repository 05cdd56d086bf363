mod actions;
mod config;
mod consts;
mod errors;
mod events;
mod language_model;
mod pipeline;
mod sentence_history;
mod text_units;
mod tpsf;
mod transforming_sequence;
mod utils;

pub use actions::{
    Action, ActionClassifier, ActionGroups, ActionType, Classification, GroupKey,
    GroupingDecision, GroupingRule, LengthCorrection, ReplacedSpan, aggregate,
};
pub use config::{Language, PipelineConfig, SourceFormat};
pub use errors::{LanguageModelError, PipelineError, RecordError};
pub use events::{Event, EventKind, EventLog, Key, ModifierKey, NavigationKey};
pub use language_model::{LanguageModel, RuleBasedModel, TaggedWord};
pub use pipeline::{DocumentHistory, DocumentReport, process_document, process_documents};
pub use sentence_history::{
    EditingStage, LocalEdit, SentenceHistory, SentenceHistoryBuilder, SentenceId,
    SentenceVersion,
};
pub use text_units::{
    ContainmentMatcher, MatchQuery, PredecessorMatcher, Reconciled, SegmentedUnit, StateRule,
    TextUnit, TextUnitBuilder, TextUnitState, TextUnitType, reconcile, segment,
};
pub use tpsf::{
    CharBuffer, EditScope, OutOfRange, RelevanceEvaluator, TextTransformation, Tpsf, TpsfChain,
    TpsfFactory,
};
pub use transforming_sequence::{Burst, Edit, TransformingSequence, decompose};
