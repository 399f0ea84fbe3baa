/// Size limits applied to every input line.
///
/// The defaults match the classic fixed-buffer shell this interpreter is
/// modelled on: 100 bytes per line, 16 words per line and 64 bytes per word,
/// where the word budget includes a terminator so only 63 bytes are usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Longest accepted line, in bytes, not counting the newline.
    pub max_line_len: usize,
    /// Maximum number of words on one line, `|` separators included.
    pub max_words: usize,
    /// Word length budget; a word must be strictly shorter than this.
    pub max_word_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_line_len: 100,
            max_words: 16,
            max_word_len: 64,
        }
    }
}
