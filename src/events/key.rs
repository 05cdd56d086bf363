#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The key behind a keyboard event. Insert and replacement records carry
/// `Key::Production`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Key {
    /// Any key producing a character.
    #[default]
    Production,
    Modifier(ModifierKey),
    Backspace,
    Delete,
    Navigation(NavigationKey),
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKey {
    Shift,
    Control,
    Alt,
    CapsLock,
    Other,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKey {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    Mouse,
}

impl Key {
    #[must_use]
    pub fn is_deletion(self) -> bool { matches!(self, Key::Backspace | Key::Delete) }
}
