//! Reply cleaning
//!
//! Models wrap their in-game output in reasoning blocks, markup and labels.
//! These functions reduce a raw reply to the content the game actually uses.

use regex::Regex;
use std::sync::LazyLock;

/// Word used when a model produces nothing usable
pub const PLACEHOLDER_WORD: &str = "...";

/// Replacement written over a leaked secret word
pub const REDACTION: &str = "****";

/// Tokens that are artifacts of the prompt format, never real answers
pub const DEGENERATE_TOKENS: &[&str] = &[
    "think",
    "thinking",
    "pensando",
    "respuesta",
    "answer",
    "output",
    "response",
];

const REASONING_LINE_PREFIXES: &[&str] = &[
    "pensando:",
    "thinking:",
    "razonamiento:",
    "analisis:",
    "analysis:",
    "reasoning:",
    "<think",
    "</think",
];

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new($re).unwrap()
        });
    };
}

pattern!(CLOSED_THINK, r"(?is)<\s*think(?:ing)?\s*>.*?<\s*/\s*think(?:ing)?\s*>");
pattern!(UNCLOSED_THINK, r"(?is)<\s*think(?:ing)?\s*>.*");
pattern!(ORPHAN_CLOSE, r"(?i)<\s*/\s*think(?:ing)?\s*>");
pattern!(ANY_TAG, r"<[^>]+>");
pattern!(BRACKETED, r"\[.*?\]");
pattern!(THINKING_ASIDE, r"(?i)\((?:pensando|thinking).*?\)");
pattern!(ANSWER_LABEL, r"(?im)^\s*(?:respuesta|answer|output|response)\s*:\s*");

/// Strip reasoning blocks, markup, bracketed notes and labels from a reply.
///
/// Quotes wrapping the whole reply are removed as well.
pub fn clean_response(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = CLOSED_THINK.replace_all(raw, "");
    let text = UNCLOSED_THINK.replace_all(&text, "");
    let text = ORPHAN_CLOSE.replace_all(&text, "");
    let text = ANY_TAG.replace_all(&text, "");
    let text = BRACKETED.replace_all(&text, "");
    let text = THINKING_ASIDE.replace_all(&text, "");
    let text = ANSWER_LABEL.replace_all(&text, "");

    let kept: Vec<&str> = text
        .lines()
        .filter(|line| {
            let lower = line.trim().to_lowercase();
            !REASONING_LINE_PREFIXES.iter().any(|p| lower.starts_with(p))
        })
        .collect();
    let joined = kept.join("\n");

    strip_wrapping_quotes(joined.trim()).trim().to_string()
}

fn strip_wrapping_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// Replace every occurrence of `secret` with [`REDACTION`], ignoring case.
///
/// Nothing else in the message changes.
pub fn redact_secret_word(message: &str, secret: &str) -> String {
    let secret = secret.trim();
    if message.is_empty() || secret.is_empty() {
        return message.to_string();
    }
    match Regex::new(&format!("(?i){}", regex::escape(secret))) {
        Ok(re) => re.replace_all(message, REDACTION).into_owned(),
        Err(_) => message.to_string(),
    }
}

/// First whitespace-separated token with surrounding punctuation removed
pub fn extract_single_word(text: &str) -> String {
    const PUNCT: &[char] = &[
        '.', ',', '!', '?', ':', ';', '"', '\'', '(', ')', '[', ']', '{', '}', '¡', '¿',
    ];
    text.split_whitespace()
        .next()
        .map(|token| token.trim_matches(PUNCT).to_string())
        .unwrap_or_default()
}

/// A word is usable if it is longer than one character and not a format artifact
pub fn is_valid_word(word: &str) -> bool {
    let lower = word.trim().to_lowercase();
    lower.chars().count() > 1 && !DEGENERATE_TOKENS.contains(&lower.as_str())
}

/// Reduce a raw reply to a single in-game word, or [`PLACEHOLDER_WORD`].
///
/// Lines are tried in order so a reply that opens with an artifact line can
/// still yield a word further down.
pub fn word_from_reply(raw: &str) -> String {
    let cleaned = clean_response(raw);
    cleaned
        .lines()
        .map(extract_single_word)
        .find(|word| is_valid_word(word))
        .unwrap_or_else(|| PLACEHOLDER_WORD.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_closed_think_block() {
        let raw = "<think>the word is beach so...</think>\nsand";
        assert_eq!(clean_response(raw), "sand");
    }

    #[test]
    fn test_removes_unclosed_think_block() {
        assert_eq!(clean_response("wave <think>maybe I should"), "wave");
    }

    #[test]
    fn test_removes_orphan_close_and_markup() {
        assert_eq!(clean_response("</think> <b>towel</b> [smiles]"), "towel");
    }

    #[test]
    fn test_removes_labels_and_reasoning_lines() {
        let raw = "Thinking: who could it be\nAnswer: sunscreen";
        assert_eq!(clean_response(raw), "sunscreen");
        assert_eq!(clean_response("(thinking hard) shell"), "shell");
    }

    #[test]
    fn test_strips_wrapping_quotes() {
        assert_eq!(clean_response("\"Gamma is suspicious\""), "Gamma is suspicious");
        assert_eq!(clean_response("'sun'"), "sun");
        assert_eq!(clean_response("\""), "\"");
    }

    #[test]
    fn test_redaction_is_case_insensitive_and_local() {
        let message = "PLAYA? I said Playa-adjacent things, not playas.";
        assert_eq!(
            redact_secret_word(message, "playa"),
            "****? I said ****-adjacent things, not ****s."
        );
    }

    #[test]
    fn test_redaction_leaves_other_text_alone() {
        let message = "Beta (the quiet one) said: sand + waves";
        assert_eq!(redact_secret_word(message, "playa"), message);
        assert_eq!(redact_secret_word(message, ""), message);
    }

    #[test]
    fn test_redaction_escapes_regex_metacharacters() {
        assert_eq!(redact_secret_word("c++ rocks", "C++"), "**** rocks");
    }

    #[test]
    fn test_extract_single_word() {
        assert_eq!(extract_single_word("  \"Sand!\" and more"), "Sand");
        assert_eq!(extract_single_word("¿Arena?"), "Arena");
        assert_eq!(extract_single_word(""), "");
    }

    #[test]
    fn test_degenerate_tokens_rejected() {
        assert!(!is_valid_word("Thinking"));
        assert!(!is_valid_word("a"));
        assert!(is_valid_word("ola"));
    }

    #[test]
    fn test_word_from_reply_falls_back() {
        assert_eq!(word_from_reply("<think>hmm"), PLACEHOLDER_WORD);
        assert_eq!(word_from_reply("response\nsunset"), "sunset");
        assert_eq!(word_from_reply("Sunset, obviously."), "Sunset");
    }
}
