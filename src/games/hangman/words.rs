use rand::Rng;

/// Built-in secret words for single-player games.
pub const WORDS: &[&str] = &[
    "EXAMPLE", "RUST", "ASYNC", "TOKIO", "HANGMAN", "TERMINAL", "GALLOWS", "KEYBOARD",
    "ALPHABET", "PUZZLE", "MYSTERY", "LANTERN", "COMPILER", "BORROW",
];

pub fn random_word() -> &'static str {
    let mut rng = rand::rng();
    WORDS[rng.random_range(0..WORDS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hangman::HangmanEngine;

    #[test]
    fn built_in_words_are_valid_secrets() {
        for word in WORDS {
            assert!(HangmanEngine::is_valid_secret_word(word), "{}", word);
        }
    }

    #[test]
    fn random_word_comes_from_list() {
        for _ in 0..20 {
            assert!(WORDS.contains(&random_word()));
        }
    }
}
