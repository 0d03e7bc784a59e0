use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block, what remains of an accent after NFD.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Folds a guess or a word into its comparable form: accents stripped, lower case, trimmed.
pub fn fold(text: &str) -> String {
    text.trim()
        .nfd()
        .filter(|char| !COMBINING_MARKS.contains(char))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Folds a single letter. Keeps the display and the comparable form of a word aligned letter by
/// letter, so it always yields exactly one char.
pub fn fold_char(letter: char) -> char {
    letter
        .nfd()
        .find(|char| !COMBINING_MARKS.contains(char))
        .and_then(|char| char.to_lowercase().next())
        .unwrap_or(letter)
}
