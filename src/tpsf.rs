mod char_buffer;
mod relevance;
mod replay;
mod snapshot;
mod text_transformation;

pub use char_buffer::{CharBuffer, OutOfRange};
pub use relevance::RelevanceEvaluator;
pub use replay::TpsfFactory;
pub use snapshot::{Tpsf, TpsfChain};
pub use text_transformation::{EditScope, TextTransformation};
