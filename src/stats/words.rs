use unicode_general_category::{GeneralCategory, get_general_category};

use super::mapping::Mapping;

/// Words too common to be interesting. Matched after title-casing.
pub const STOP_WORDS: [&str; 16] = [
    "A", "An", "And", "As", "At", "Be", "For", "In", "Is", "It", "Of", "On", "So", "The", "To",
    "With",
];

const OPENERS: [char; 8] = ['(', '[', '{', '"', '\'', '“', '‘', '«'];

/// Splits a title into countable words and pushes each one into `mapping`.
pub fn count_words(sentence: &str, mapping: &mut Mapping) {
    for word in extract_words(sentence) {
        mapping.push(word);
    }
}

/// Words of `sentence` in order, cleaned and title-cased, stop words removed.
///
/// A token is dropped when it starts with a symbol, punctuation or digit once
/// opening brackets and quotes are stripped. One such trailing character is
/// trimmed, so `"World!"` and `"(Remix)"` become `"World"` and `"Remix"`.
/// Combining marks count as part of the word.
pub fn extract_words(sentence: &str) -> Vec<String> {
    sentence.split_whitespace().filter_map(clean_word).collect()
}

fn clean_word(token: &str) -> Option<String> {
    let token = token.trim().trim_start_matches(OPENERS);
    let mut chars: Vec<char> = token.chars().collect();

    let first = *chars.first()?;
    if is_invalid(first) {
        return None;
    }

    if chars.len() > 1 && chars.last().is_some_and(|c| is_invalid(*c)) {
        chars.pop();
    }

    let word: String = first
        .to_uppercase()
        .chain(chars.into_iter().skip(1))
        .collect();

    if STOP_WORDS.contains(&word.as_str()) {
        return None;
    }
    Some(word)
}

/// Symbols (S*), punctuation (P*) and numbers (N*).
fn is_invalid(c: char) -> bool {
    use GeneralCategory::*;

    matches!(
        get_general_category(c),
        ConnectorPunctuation
            | DashPunctuation
            | OpenPunctuation
            | ClosePunctuation
            | InitialPunctuation
            | FinalPunctuation
            | OtherPunctuation
            | MathSymbol
            | CurrencySymbol
            | ModifierSymbol
            | OtherSymbol
            | DecimalNumber
            | LetterNumber
            | OtherNumber
    )
}
