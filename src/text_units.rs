mod predecessor;
mod reconciler;
mod segmenter;
mod text_unit;

pub use predecessor::{ContainmentMatcher, MatchQuery, PredecessorMatcher};
pub use reconciler::{Reconciled, reconcile};
pub use segmenter::{SegmentedUnit, segment};
pub use text_unit::{StateRule, TextUnit, TextUnitBuilder, TextUnitState, TextUnitType};
