//! Splitting an input line into words.

use crate::config::Limits;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::trace;

/// A single word of the input line, borrowed without copying.
pub type Token<'a> = &'a str;

// Words are separated by runs of spaces and/or tabs only.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^ \t]+").expect("word pattern is a valid regex"));

/// Errors that make a line unusable before anything is resolved or run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The line holds more words than [`Limits::max_words`].
    TooManyWords,
    /// A word does not fit in [`Limits::max_word_len`].
    WordTooLong,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::TooManyWords => write!(f, "Too many words"),
            ParseError::WordTooLong => write!(f, "Word too long"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Split `line` into words, in input order.
///
/// Words are checked one at a time from the left, so whichever limit is broken
/// first decides the error.
pub fn tokenize<'a>(line: &'a str, limits: &Limits) -> Result<Vec<Token<'a>>, ParseError> {
    let mut tokens = Vec::new();
    for word in WORD.find_iter(line) {
        if tokens.len() == limits.max_words {
            return Err(ParseError::TooManyWords);
        }
        if word.len() >= limits.max_word_len {
            return Err(ParseError::WordTooLong);
        }
        tokens.push(word.as_str());
    }
    trace!(?tokens, "tokenized line");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_splits_on_spaces_and_tabs() {
        let tokens = tokenize("ls \t -l\t\t/tmp   x", &Limits::default()).unwrap();
        assert_eq!(tokens, vec!["ls", "-l", "/tmp", "x"]);
    }

    #[test]
    fn test_no_empty_words() {
        let tokens = tokenize("  \t ", &Limits::default()).unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_pipe_is_an_ordinary_word() {
        let tokens = tokenize("a | b", &Limits::default()).unwrap();
        assert_eq!(tokens, vec!["a", "|", "b"]);

        // Only a free-standing `|` is a separator later on.
        let tokens = tokenize("a|b", &Limits::default()).unwrap();
        assert_eq!(tokens, vec!["a|b"]);
    }

    #[test]
    fn test_sixteen_words_accepted_in_order() {
        let line = words(16);
        let tokens = tokenize(&line, &Limits::default()).unwrap();
        assert_eq!(tokens.len(), 16);
        assert_eq!(tokens[0], "w0");
        assert_eq!(tokens[15], "w15");
    }

    #[test]
    fn test_seventeen_words_rejected() {
        let line = words(17);
        assert_eq!(
            tokenize(&line, &Limits::default()),
            Err(ParseError::TooManyWords)
        );
    }

    #[test]
    fn test_word_length_boundary() {
        let ok = "a".repeat(63);
        assert_eq!(tokenize(&ok, &Limits::default()).unwrap(), vec![ok.as_str()]);

        let long = "a".repeat(64);
        assert_eq!(
            tokenize(&long, &Limits::default()),
            Err(ParseError::WordTooLong)
        );
    }

    #[test]
    fn test_first_violation_wins() {
        let line = format!("a {} {}", "b".repeat(80), words(20));
        assert_eq!(
            tokenize(&line, &Limits::default()),
            Err(ParseError::WordTooLong)
        );
    }

    #[test]
    fn test_custom_limits() {
        let limits = Limits {
            max_words: 2,
            max_word_len: 4,
            ..Limits::default()
        };
        assert_eq!(tokenize("abc de", &limits).unwrap(), vec!["abc", "de"]);
        assert_eq!(tokenize("abcd", &limits), Err(ParseError::WordTooLong));
        assert_eq!(tokenize("a b c", &limits), Err(ParseError::TooManyWords));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ParseError::TooManyWords.to_string(), "Too many words");
        assert_eq!(ParseError::WordTooLong.to_string(), "Word too long");
    }
}
