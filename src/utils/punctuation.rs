/// Characters ending a sentence.
pub fn is_terminal_punctuation(c: char) -> bool { matches!(c, '.' | '!' | '?' | '…') }

/// Quotation marks and brackets which may follow the terminal punctuation of
/// a sentence.
pub fn is_closing_mark(c: char) -> bool {
    matches!(
        c,
        '"' | '\'' | ')' | ']' | '}' | '»' | '«' | '“' | '”' | '’' | '‘'
    )
}

/// Quotation marks and brackets which may precede the first letter of a
/// sentence.
pub fn is_opening_mark(c: char) -> bool {
    matches!(
        c,
        '"' | '\'' | '(' | '[' | '{' | '»' | '«' | '„' | '“' | '‘' | '‚'
    )
}

/// Closing quotation marks that sentence segmenters tend to attach to the
/// start of the following sentence.
pub fn is_closing_quote(c: char) -> bool { matches!(c, '"' | '”' | '’' | '“' | '«' | '»') }

pub fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || is_terminal_punctuation(c)
        || is_opening_mark(c)
        || is_closing_mark(c)
        || matches!(c, '–' | '—' | '¿' | '¡')
}

pub fn contains_punctuation(text: &str) -> bool { text.chars().any(is_punctuation) }
