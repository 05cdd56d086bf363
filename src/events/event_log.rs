#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{event::Event, key::Key};

/// The ordered events of one writing session. Linking happens once, in
/// `new`; afterwards the events are read-only and their neighbours are
/// looked up by index.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<Event>", into = "Vec<Event>"))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Derive each event's `pause` from the end of the previous event and
    /// the destination of navigation events that don't carry one.
    #[must_use]
    pub fn new(mut events: Vec<Event>) -> Self {
        for i in 0..events.len() {
            if i > 0 {
                let previous_end = events[i - 1].end_time;
                if let (Some(start), Some(previous_end)) = (events[i].start_time, previous_end) {
                    events[i].pause = Some(start - previous_end);
                }
            }

            if matches!(events[i].key, Key::Navigation(_)) && events[i].end_pos.is_none() {
                events[i].end_pos = events.get(i + 1).map(|next| next.start_pos);
            }
        }

        Self { events }
    }

    /// The event at `index` with the events before and after it, or `None`
    /// when `index` is out of range.
    #[must_use]
    pub fn neighbours(&self, index: usize) -> Option<(Option<&Event>, &Event, Option<&Event>)> {
        let event = self.events.get(index)?;
        let previous = index.checked_sub(1).and_then(|i| self.events.get(i));
        Some((previous, event, self.events.get(index + 1)))
    }

    #[must_use]
    pub fn events(&self) -> &[Event] { &self.events }

    #[must_use]
    pub fn len(&self) -> usize { self.events.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.events.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &Event> { self.events.iter() }
}

impl From<Vec<Event>> for EventLog {
    fn from(events: Vec<Event>) -> Self { Self::new(events) }
}

impl From<EventLog> for Vec<Event> {
    fn from(log: EventLog) -> Self { log.events }
}
