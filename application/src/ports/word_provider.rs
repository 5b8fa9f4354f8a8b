//! Word provider port

use impostor_domain::SecretWord;

/// Source of secret words.
///
/// Returns `None` only when the source is empty.
pub trait WordProvider: Send + Sync {
    fn next_secret_word(&self) -> Option<SecretWord>;
}

/// Always deals the same word. Useful for tests and replays.
pub struct FixedWord(pub SecretWord);

impl FixedWord {
    pub fn new(word: &str, category: &str) -> Self {
        Self(SecretWord {
            word: word.to_string(),
            category: category.to_string(),
        })
    }
}

impl WordProvider for FixedWord {
    fn next_secret_word(&self) -> Option<SecretWord> {
        Some(self.0.clone())
    }
}
