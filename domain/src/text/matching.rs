//! Accent- and case-insensitive comparison of guesses

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Lowercase, trim and strip combining marks (`Café` -> `cafe`).
pub fn fold(text: &str) -> String {
    text.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Whether `guess` names `secret`, ignoring case, accents and surrounding
/// whitespace.
pub fn words_match(guess: &str, secret: &str) -> bool {
    let guess = fold(guess);
    !guess.is_empty() && guess == fold(secret)
}
