pub const DEFAULT_PAUSE_DURATION: f64 = 2.0;
pub const DEFAULT_MIN_EDIT_DISTANCE: usize = 3;
pub const DEFAULT_TS_MIN_TOKENS_NUMBER: usize = 1;
pub const DEFAULT_COMBINE_EDIT_DISTANCE_WITH_TOK_NUMBER: bool = false;
pub const DEFAULT_ENABLE_SPELLCHECKING: bool = false;
pub const DEFAULT_INCLUDE_PUNCTUATION_EDITS: bool = true;
