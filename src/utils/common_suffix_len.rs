use std::ops::{Index, Range};

/// Given two lookups and ranges calculates the length of the common suffix.
/// Copied from <https://github.com/mitsuhiko/similar/blob/7e15c44de11a1cd61e1149189929e189ef977fd8/src/algorithms/utils.rs>
pub fn common_suffix_len<Old, New>(
    old: &Old,
    old_range: Range<usize>,
    new: &New,
    new_range: Range<usize>,
) -> usize
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    New::Output: PartialEq<Old::Output>,
{
    new_range
        .rev()
        .zip(old_range.rev())
        .take_while(|x| new[x.0] == old[x.1])
        .count()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_common_suffix_len() {
        let chars = |text: &str| text.chars().collect::<Vec<_>>();

        assert_eq!(common_suffix_len(&chars("")[..], 0..0, &chars("")[..], 0..0), 0);
        assert_eq!(
            common_suffix_len(&chars("The cat sat.")[..], 0..12, &chars("A cat sat.")[..], 0..10),
            9
        );
        assert_eq!(
            common_suffix_len(&chars("abc")[..], 0..3, &chars("abd")[..], 0..3),
            0
        );
        assert_eq!(
            common_suffix_len(&chars("abcd")[..], 0..2, &chars("xbcd")[..], 0..2),
            1
        );
    }
}
