#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::PipelineError;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextUnitType {
    /// Whitespace between sentences.
    SentenceInterspace,
    /// Text which is not (yet) a complete sentence.
    SentenceCandidate,
    Sentence,
    /// Whitespace containing a line break.
    ParagraphInterspace,
}

impl TextUnitType {
    #[must_use]
    pub fn is_interspace(self) -> bool {
        matches!(
            self,
            TextUnitType::SentenceInterspace | TextUnitType::ParagraphInterspace
        )
    }

    #[must_use]
    pub fn is_sentence_like(self) -> bool { !self.is_interspace() }
}

/// How a unit relates to the units of the previous snapshot.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextUnitState {
    UnchangedPre,
    UnchangedPost,
    Modified,
    New,
    Split,
    Deleted,
}

impl TextUnitState {
    #[must_use]
    pub fn is_unchanged(self) -> bool {
        matches!(self, TextUnitState::UnchangedPre | TextUnitState::UnchangedPost)
    }
}

/// The reconciliation rule that decided a unit's state.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateRule {
    VerbatimBefore,
    VerbatimAfter,
    SplitRemainder,
    CoveredByProduction,
    SplitByLeadingFragment,
    /// Broke off a previous unit that an earlier unit continues.
    SplitOffContinued,
    Fallback,
    /// The unit of the previous snapshot is gone.
    Vanished,
}

/// A sentence, sentence candidate or the whitespace between them, as found in
/// one snapshot.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit {
    pub unit_type: TextUnitType,
    pub text: String,
    pub state: TextUnitState,
    pub tpsf_id: usize,
    /// Index into the previous snapshot's text units.
    pub predecessor: Option<usize>,
    pub rule: StateRule,
}

impl TextUnit {
    #[must_use]
    pub fn builder() -> TextUnitBuilder { TextUnitBuilder::default() }

    #[must_use]
    pub fn char_len(&self) -> usize { self.text.chars().count() }
}

#[derive(Debug, Clone, Default)]
pub struct TextUnitBuilder {
    unit_type: Option<TextUnitType>,
    text: Option<String>,
    state: Option<TextUnitState>,
    tpsf_id: Option<usize>,
    predecessor: Option<usize>,
    rule: Option<StateRule>,
}

impl TextUnitBuilder {
    #[must_use]
    pub fn unit_type(mut self, unit_type: TextUnitType) -> Self {
        self.unit_type = Some(unit_type);
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: TextUnitState, rule: StateRule) -> Self {
        self.state = Some(state);
        self.rule = Some(rule);
        self
    }

    #[must_use]
    pub fn tpsf_id(mut self, tpsf_id: usize) -> Self {
        self.tpsf_id = Some(tpsf_id);
        self
    }

    #[must_use]
    pub fn predecessor(mut self, predecessor: Option<usize>) -> Self {
        self.predecessor = predecessor;
        self
    }

    /// Fails when the type, text, state or snapshot id is missing.
    pub fn build(self) -> Result<TextUnit, PipelineError> {
        Ok(TextUnit {
            unit_type: self
                .unit_type
                .ok_or(PipelineError::IncompleteTextUnit("unit_type"))?,
            text: self.text.ok_or(PipelineError::IncompleteTextUnit("text"))?,
            state: self.state.ok_or(PipelineError::IncompleteTextUnit("state"))?,
            tpsf_id: self.tpsf_id.ok_or(PipelineError::IncompleteTextUnit("tpsf_id"))?,
            predecessor: self.predecessor,
            rule: self.rule.ok_or(PipelineError::IncompleteTextUnit("rule"))?,
        })
    }
}
