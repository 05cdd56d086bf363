use std::ops::RangeInclusive;

use thiserror::Error;

/// A position or range that doesn't exist in the buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Invalid buffer access: characters {start}..={end} requested, but the buffer only has {len} \
     characters"
)]
pub struct OutOfRange {
    pub start: usize,
    pub end: usize,
    pub len: usize,
}

/// The text being replayed. It is safe to use with UTF-8 strings as all
/// operations are based on character indices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharBuffer {
    chars: Vec<char>,
}

impl CharBuffer {
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.chars.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.chars.is_empty() }

    /// Insert `text` so that its first character ends up at `index`.
    /// Inserting right after the last character is allowed.
    pub fn insert(&mut self, index: usize, text: &str) -> Result<(), OutOfRange> {
        if index > self.chars.len() {
            return Err(OutOfRange {
                start: index,
                end: index,
                len: self.chars.len(),
            });
        }

        self.chars.splice(index..index, text.chars());

        Ok(())
    }

    /// Remove the characters of `range` and return them.
    pub fn remove(&mut self, range: RangeInclusive<usize>) -> Result<String, OutOfRange> {
        let (start, end) = (*range.start(), *range.end());
        if start > end || end >= self.chars.len() {
            return Err(OutOfRange {
                start,
                end,
                len: self.chars.len(),
            });
        }

        Ok(self.chars.drain(range).collect())
    }

    #[must_use]
    pub fn text(&self) -> String { self.chars.iter().collect() }
}
