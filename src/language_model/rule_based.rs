use std::collections::HashSet;

use super::{LanguageModel, TaggedWord};
use crate::{
    config::Language,
    errors::LanguageModelError,
    utils::punctuation::{is_closing_mark, is_opening_mark, is_punctuation, is_terminal_punctuation},
};

const ENGLISH_ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "st.", "vs.", "cf.", "e.g.", "i.e.", "etc.",
];

const GERMAN_ABBREVIATIONS: &[&str] = &[
    "z.b.", "d.h.", "bzw.", "ca.", "dr.", "nr.", "vgl.", "u.a.", "usw.", "s.",
];

/// A language model working from punctuation and whitespace alone, with an
/// optional word list for spotting typos.
#[derive(Debug, Clone)]
pub struct RuleBasedModel {
    language: Language,
    lexicon: Option<HashSet<String>>,
}

impl RuleBasedModel {
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self {
            language,
            lexicon: None,
        }
    }

    /// Words missing from `words` are reported as typos.
    #[must_use]
    pub fn with_lexicon<I, S>(self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lexicon: Some(
                words
                    .into_iter()
                    .map(|word| word.as_ref().trim().to_lowercase())
                    .filter(|word| !word.is_empty())
                    .collect(),
            ),
            ..self
        }
    }

    fn abbreviations(&self) -> &'static [&'static str] {
        match self.language {
            Language::English => ENGLISH_ABBREVIATIONS,
            Language::German => GERMAN_ABBREVIATIONS,
        }
    }

    /// Whether the word ending in the full stop at `chars[end]` is a known
    /// abbreviation.
    fn is_abbreviation(&self, chars: &[char], end: usize) -> bool {
        let start = chars[..end]
            .iter()
            .rposition(|c| c.is_whitespace())
            .map_or(0, |i| i + 1);

        let word = chars[start..=end]
            .iter()
            .skip_while(|c| is_opening_mark(**c))
            .collect::<String>()
            .to_lowercase();

        self.abbreviations().contains(&word.as_str())
    }

    fn is_out_of_vocabulary(&self, word: &str) -> bool {
        self.lexicon
            .as_ref()
            .is_some_and(|lexicon| !lexicon.contains(&word.to_lowercase()))
    }
}

impl LanguageModel for RuleBasedModel {
    fn tag_words(&self, text: &str) -> Result<Vec<TaggedWord>, LanguageModelError> {
        Ok(split_tokens(text)
            .into_iter()
            .map(|token| {
                let is_whitespace = token.chars().all(char::is_whitespace);
                let is_punctuation = !is_whitespace && token.chars().all(is_punctuation);
                let is_number = !is_whitespace
                    && !is_punctuation
                    && token
                        .chars()
                        .all(|c| c.is_ascii_digit() || c == '.' || c == ',');

                let pos = if is_whitespace {
                    "SPACE"
                } else if is_punctuation {
                    "PUNCT"
                } else if is_number {
                    "NUM"
                } else {
                    "WORD"
                };
                let is_out_of_vocabulary = pos == "WORD" && self.is_out_of_vocabulary(&token);

                TaggedWord {
                    lemma: token.to_lowercase(),
                    text: token,
                    pos: pos.to_owned(),
                    dependency_relation: None,
                    is_out_of_vocabulary,
                    is_typo: is_out_of_vocabulary,
                    is_punctuation,
                    is_whitespace,
                }
            })
            .collect())
    }

    fn segment_text(&self, text: &str) -> Result<Vec<String>, LanguageModelError> {
        let chars = text.chars().collect::<Vec<_>>();
        let mut segments = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let boundary = if chars[i] == '\n' {
                Some(i)
            } else if is_terminal_punctuation(chars[i]) {
                let mut end = i + 1;
                while end < chars.len()
                    && (is_terminal_punctuation(chars[end]) || is_closing_mark(chars[end]))
                {
                    end += 1;
                }

                let is_followed_by_space = chars.get(end).is_some_and(|c| c.is_whitespace());
                let is_abbreviation = chars[i] == '.' && self.is_abbreviation(&chars, i);

                if !is_followed_by_space || is_abbreviation {
                    i = end;
                    continue;
                }

                Some(end)
            } else {
                None
            };

            let Some(whitespace_start) = boundary else {
                i += 1;
                continue;
            };

            let mut end = whitespace_start;
            while end < chars.len() && chars[end].is_whitespace() {
                end += 1;
            }

            segments.push(chars[start..end].iter().collect());
            start = end;
            i = end;
        }

        if start < chars.len() {
            segments.push(chars[start..].iter().collect());
        }

        Ok(segments)
    }

    fn check_if_typo(&self, token: &str) -> Result<bool, LanguageModelError> {
        let is_word = token.chars().any(char::is_alphabetic);
        Ok(is_word && self.is_out_of_vocabulary(token.trim_matches(is_punctuation)))
    }
}

/// Whitespace runs, words (letters and digits joined by inner apostrophes or
/// hyphens) and single punctuation characters.
fn split_tokens(text: &str) -> Vec<String> {
    let chars = text.chars().collect::<Vec<_>>();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let start = i;

        if chars[i].is_whitespace() {
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
        } else if chars[i].is_alphanumeric() {
            while i < chars.len() {
                let is_inner_joiner = matches!(chars[i], '\'' | '’' | '-')
                    && chars.get(i + 1).is_some_and(|c| c.is_alphanumeric());
                if !(chars[i].is_alphanumeric() || is_inner_joiner) {
                    break;
                }
                i += 1;
            }
        } else {
            i += 1;
        }

        tokens.push(chars[start..i].iter().collect());
    }

    tokens
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("Hello world. Bye.", &["Hello world. ", "Bye."]; "two sentences")]
    #[test_case("Hello world.", &["Hello world."]; "no trailing space")]
    #[test_case("Wait... what?! No.", &["Wait... ", "what?! ", "No."]; "repeated marks")]
    #[test_case("He said \"Go.\" Then left", &["He said \"Go.\" ", "Then left"]; "closing quote")]
    #[test_case("Ask Dr. Smith. Now", &["Ask Dr. Smith. ", "Now"]; "abbreviation")]
    #[test_case("Title\n\nBody text", &["Title\n\n", "Body text"]; "paragraphs")]
    #[test_case("", &[]; "empty")]
    fn test_segment_english(text: &str, expected: &[&str]) {
        let segments = RuleBasedModel::new(Language::English)
            .segment_text(text)
            .unwrap();

        assert_eq!(segments, expected);
    }

    #[test]
    fn test_segment_german_abbreviation() {
        let segments = RuleBasedModel::new(Language::German)
            .segment_text("Das ist z.B. gut. Ja.")
            .unwrap();

        assert_eq!(segments, vec!["Das ist z.B. gut. ", "Ja."]);
    }

    #[test]
    fn test_tag_words() {
        let model = RuleBasedModel::new(Language::English).with_lexicon(["the", "cat", "isn't"]);

        let tags = model
            .tag_words("The cat isn't 42 kats!")
            .unwrap()
            .into_iter()
            .map(|word| (word.text, word.pos, word.is_typo))
            .collect::<Vec<_>>();

        let expected = [
            ("The", "WORD", false),
            (" ", "SPACE", false),
            ("cat", "WORD", false),
            (" ", "SPACE", false),
            ("isn't", "WORD", false),
            (" ", "SPACE", false),
            ("42", "NUM", false),
            (" ", "SPACE", false),
            ("kats", "WORD", true),
            ("!", "PUNCT", false),
        ]
        .map(|(text, pos, is_typo)| (text.to_owned(), pos.to_owned(), is_typo));

        assert_eq!(tags, expected);
    }

    #[test]
    fn test_check_if_typo() {
        let model = RuleBasedModel::new(Language::English).with_lexicon(["cat"]);

        assert_eq!(model.check_if_typo("Cat,"), Ok(false));
        assert_eq!(model.check_if_typo("kat"), Ok(true));
        assert_eq!(model.check_if_typo("..."), Ok(false));
        assert_eq!(
            RuleBasedModel::new(Language::English).check_if_typo("kat"),
            Ok(false)
        );
    }
}
