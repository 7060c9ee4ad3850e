use serde::{Deserialize, Serialize};
use unicode_categories::UnicodeCategories;

/// A token with its UTF-8 byte offsets in the analyzed text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// The token text content.
    pub text: String,
    /// Byte offset (inclusive) in the analyzed text.
    pub start: usize,
    /// Byte offset (exclusive) in the analyzed text.
    pub end: usize,
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

/// Word characters: any letter (L*), any number (N*) or underscore.
/// Combining marks are not word characters, so they split runs.
pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_letter() || ch.is_number() || ch == '_'
}

/// Tokenizes text with the default token pattern and produces byte offsets.
///
/// A token is a maximal run of word characters that is at least two
/// characters long; everything else (whitespace, punctuation, single
/// letters) separates or is dropped. No case folding happens here.
///
/// ```rust
/// use canonical::tokenize;
///
/// let tokens = tokenize("I loved it, 10/10!");
/// let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
/// assert_eq!(texts, vec!["loved", "it", "10", "10"]);
/// ```
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut run_chars = 0usize;

    for (idx, ch) in text.char_indices() {
        if is_word_char(ch) {
            if start.is_none() {
                start = Some(idx);
                run_chars = 0;
            }
            run_chars += 1;
        } else if let Some(token_start) = start.take() {
            push_run(&mut tokens, text, token_start, idx, run_chars);
        }
    }

    if let Some(token_start) = start {
        push_run(&mut tokens, text, token_start, text.len(), run_chars);
    }

    tokens
}

fn push_run(tokens: &mut Vec<Token>, text: &str, start: usize, end: usize, run_chars: usize) {
    if run_chars >= 2 {
        tokens.push(Token {
            text: text[start..end].to_string(),
            start,
            end,
        });
    }
}
