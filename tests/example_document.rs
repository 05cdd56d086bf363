use serde::Deserialize;
use writing_history::{Event, NavigationKey};

/// A writing session described as editor commands, which are turned into
/// the events an XML keystroke logger would record for them.
#[derive(Debug, Clone, Deserialize)]
pub struct ExampleDocument {
    pub name: String,
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    steps: Vec<Step>,
    pub final_text: String,
    #[serde(default)]
    pub snapshots: Option<Vec<String>>,
    #[serde(default)]
    pub sentences: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Step {
    Type(String),
    Paste(String),
    Backspace(usize),
    Delete(usize),
    Move(usize),
    Replace {
        start: usize,
        end: usize,
        with: String,
    },
    Pause(f64),
}

const KEY_DURATION: f64 = 0.05;
const KEY_INTERVAL: f64 = 0.15;

#[derive(Debug, Default)]
struct Editor {
    text: Vec<char>,
    cursor: usize,
    time: f64,
    events: Vec<Event>,
}

impl Editor {
    fn log(&mut self, event: Event) {
        self.events
            .push(event.with_times(self.time, self.time + KEY_DURATION));
        self.time += KEY_INTERVAL;
    }

    fn apply(&mut self, step: &Step) {
        match step {
            Step::Type(text) => {
                for c in text.chars() {
                    self.text.insert(self.cursor, c);
                    self.log(Event::production(
                        self.cursor,
                        &c.to_string(),
                        self.text.len(),
                    ));
                    self.cursor += 1;
                }
            }
            Step::Paste(text) => {
                let length = text.chars().count();
                self.text.splice(self.cursor..self.cursor, text.chars());
                self.log(Event::insert(self.cursor, text, self.text.len()));
                self.cursor += length;
            }
            Step::Backspace(count) => {
                for _ in 0..*count {
                    // The logger reports one more than the length before the key.
                    self.log(Event::backspace(self.cursor, self.text.len() + 1));
                    self.cursor -= 1;
                    self.text.remove(self.cursor);
                }
            }
            Step::Delete(count) => {
                for _ in 0..*count {
                    self.log(Event::delete(self.cursor, self.text.len()));
                    self.text.remove(self.cursor);
                }
            }
            Step::Move(position) => {
                self.log(Event::navigation(
                    NavigationKey::Mouse,
                    self.cursor,
                    Some(*position),
                    self.text.len(),
                ));
                self.cursor = *position;
            }
            Step::Replace { start, end, with } => {
                self.apply(&Step::Move(*start));
                self.text.splice(*start..*end, with.chars());
                self.log(Event::replacement(
                    *start,
                    Some(*end),
                    with,
                    self.text.len(),
                ));
                self.cursor = start + with.chars().count();
            }
            Step::Pause(seconds) => self.time += seconds,
        }
    }
}

impl ExampleDocument {
    pub fn events(&self) -> Vec<Event> {
        let mut editor = Editor::default();
        for step in &self.steps {
            editor.apply(step);
        }

        assert_eq!(
            editor.text.iter().collect::<String>(),
            self.final_text,
            "The steps of '{}' don't produce its final text",
            self.name
        );

        editor.events
    }
}
