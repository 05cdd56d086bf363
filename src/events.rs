mod event;
mod event_log;
mod key;

pub use event::{Event, EventKind};
pub use event_log::EventLog;
pub use key::{Key, ModifierKey, NavigationKey};
