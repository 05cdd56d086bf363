use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_COMBINE_EDIT_DISTANCE_WITH_TOK_NUMBER, DEFAULT_ENABLE_SPELLCHECKING,
    DEFAULT_INCLUDE_PUNCTUATION_EDITS, DEFAULT_MIN_EDIT_DISTANCE, DEFAULT_PAUSE_DURATION,
    DEFAULT_TS_MIN_TOKENS_NUMBER,
};

/// The keystroke logger that produced the events. The two loggers disagree
/// on what the logged document length means, see `LengthCorrection`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    /// Inputlog-style XML logs
    #[default]
    Xml,
    /// ScriptLog-style CSV logs
    Csv,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    German,
}

/// Every knob of the pipeline. Missing fields of a deserialised config fall
/// back to their defaults one by one.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Pauses longer than this (in seconds) close a writing burst.
    #[cfg_attr(feature = "serde", serde(default = "default_pause_duration"))]
    pub pause_duration: f64,

    /// Minimum number of inserted and removed characters for a relevant edit.
    #[cfg_attr(feature = "serde", serde(default = "default_min_edit_distance"))]
    pub min_edit_distance: usize,

    /// Minimum number of words touched by a relevant edit.
    #[cfg_attr(feature = "serde", serde(default = "default_ts_min_tokens_number"))]
    pub ts_min_tokens_number: usize,

    /// Require both thresholds above instead of either of them.
    #[cfg_attr(
        feature = "serde",
        serde(default = "default_combine_edit_distance_with_tok_number")
    )]
    pub combine_edit_distance_with_tok_number: bool,

    #[cfg_attr(feature = "serde", serde(default = "default_enable_spellchecking"))]
    pub enable_spellchecking: bool,

    /// Any edit touching punctuation is relevant.
    #[cfg_attr(feature = "serde", serde(default = "default_include_punctuation_edits"))]
    pub include_punctuation_edits: bool,

    #[cfg_attr(feature = "serde", serde(default = "default_ksl_source_format"))]
    pub ksl_source_format: SourceFormat,

    #[cfg_attr(feature = "serde", serde(default = "default_language"))]
    pub language: Language,
}

fn default_pause_duration() -> f64 {
    debug!("Using default pause duration: {DEFAULT_PAUSE_DURATION}");
    DEFAULT_PAUSE_DURATION
}

fn default_min_edit_distance() -> usize {
    debug!("Using default minimum edit distance: {DEFAULT_MIN_EDIT_DISTANCE}");
    DEFAULT_MIN_EDIT_DISTANCE
}

fn default_ts_min_tokens_number() -> usize {
    debug!("Using default minimum token count: {DEFAULT_TS_MIN_TOKENS_NUMBER}");
    DEFAULT_TS_MIN_TOKENS_NUMBER
}

fn default_combine_edit_distance_with_tok_number() -> bool {
    debug!(
        "Using default for combining edit distance with token count: \
         {DEFAULT_COMBINE_EDIT_DISTANCE_WITH_TOK_NUMBER}"
    );
    DEFAULT_COMBINE_EDIT_DISTANCE_WITH_TOK_NUMBER
}

fn default_enable_spellchecking() -> bool {
    debug!("Using default spellchecking: {DEFAULT_ENABLE_SPELLCHECKING}");
    DEFAULT_ENABLE_SPELLCHECKING
}

fn default_include_punctuation_edits() -> bool {
    debug!("Using default for punctuation edits: {DEFAULT_INCLUDE_PUNCTUATION_EDITS}");
    DEFAULT_INCLUDE_PUNCTUATION_EDITS
}

fn default_ksl_source_format() -> SourceFormat {
    let format = SourceFormat::default();
    debug!("Using default source format: {format:?}");
    format
}

fn default_language() -> Language {
    let language = Language::default();
    debug!("Using default language: {language:?}");
    language
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pause_duration: default_pause_duration(),
            min_edit_distance: default_min_edit_distance(),
            ts_min_tokens_number: default_ts_min_tokens_number(),
            combine_edit_distance_with_tok_number: default_combine_edit_distance_with_tok_number(),
            enable_spellchecking: default_enable_spellchecking(),
            include_punctuation_edits: default_include_punctuation_edits(),
            ksl_source_format: default_ksl_source_format(),
            language: default_language(),
        }
    }
}
