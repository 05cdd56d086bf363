use std::ops::Range;

/// Number of characters (not bytes) in `text`.
pub fn char_len(text: &str) -> usize { text.chars().count() }

/// Byte offset of the character at `char_index`, or the length of `text`
/// when `char_index` is past its end.
fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(offset, _)| offset)
}

/// Slice `text` by a range of character indices. Out-of-range bounds are
/// clamped to the end of the text.
pub fn char_slice(text: &str, range: Range<usize>) -> &str {
    let start = byte_offset(text, range.start);
    let end = byte_offset(text, range.end.max(range.start));

    &text[start..end]
}

/// Character indices of every occurrence of `needle` in `haystack`,
/// including overlapping ones.
pub fn char_match_indices(haystack: &str, needle: &str) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }

    let mut result = Vec::new();
    for (char_index, (byte_index, _)) in haystack.char_indices().enumerate() {
        if haystack[byte_index..].starts_with(needle) {
            result.push(char_index);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_char_slice() {
        assert_eq!(char_slice("Grüße, Welt", 2..5), "üße");
        assert_eq!(char_slice("Grüße", 3..10), "ße");
        assert_eq!(char_slice("Grüße", 4..2), "");
        assert_eq!(char_len("Grüße"), 5);
    }

    #[test]
    fn test_char_match_indices() {
        assert_eq!(char_match_indices("äa äa äa", "äa"), vec![0, 3, 6]);
        assert_eq!(char_match_indices("aaa", "aa"), vec![0, 1]);
        assert_eq!(char_match_indices("abc", ""), Vec::<usize>::new());
    }
}
