mod action;
pub mod aggregator;
pub mod classifier;

pub use action::{Action, ActionType, ReplacedSpan};
pub use aggregator::{ActionGroups, GroupKey, GroupingDecision, GroupingRule, aggregate};
pub use classifier::{ActionClassifier, Classification, LengthCorrection};
