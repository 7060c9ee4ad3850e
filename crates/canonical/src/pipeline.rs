use std::borrow::Cow;

use fxhash::FxHashSet;
use regex::Regex;

use crate::accents::strip_accents;
use crate::config::{AnalyzerConfig, AnalyzerKind};
use crate::error::AnalyzerError;
use crate::token::tokenize;
use crate::whitespace::collapse_whitespace_runs;

/// Compiled form of `token_pattern`.
#[derive(Debug, Clone)]
enum TokenPattern {
    /// Built-in scanner for the default pattern, no regex engine involved.
    Default,
    /// User pattern. `group` is set when the pattern has a capture group.
    Custom { regex: Regex, group: bool },
}

/// A compiled analyzer: turns raw text into the feature terms the vectorizer
/// counts.
///
/// Building one validates the configuration and compiles the token pattern
/// once; [`Analyzer::analyze`] is then infallible and safe to share across
/// threads.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    pattern: TokenPattern,
    stop_words: Option<FxHashSet<String>>,
}

impl Analyzer {
    /// Validates `config` and compiles it.
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        config.validate()?;

        let pattern = if config.analyzer != AnalyzerKind::Word || config.uses_default_pattern() {
            TokenPattern::Default
        } else {
            compile_pattern(&config.token_pattern)?
        };

        let stop_words = config
            .stop_words
            .as_ref()
            .map(|words| words.iter().cloned().collect::<FxHashSet<String>>());

        Ok(Self {
            config,
            pattern,
            stop_words,
        })
    }

    /// The configuration this analyzer was built from.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Lowercasing followed by accent stripping, as configured.
    pub fn preprocess<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let lowered: Cow<'a, str> = if self.config.lowercase {
            Cow::Owned(text.to_lowercase())
        } else {
            Cow::Borrowed(text)
        };

        match self.config.strip_accents {
            None => lowered,
            Some(mode) => match lowered {
                Cow::Borrowed(s) => strip_accents(s, mode),
                Cow::Owned(s) => Cow::Owned(strip_accents(&s, mode).into_owned()),
            },
        }
    }

    /// Produces the feature terms for `text`, in document order. Terms may
    /// repeat; the vectorizer counts them.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = self.preprocess(text);
        match self.config.analyzer {
            AnalyzerKind::Word => {
                let tokens = self.word_tokens(&text);
                self.word_ngrams(tokens)
            }
            AnalyzerKind::Char => self.char_ngrams(&text),
            AnalyzerKind::CharWb => self.char_wb_ngrams(&text),
        }
    }

    fn word_tokens(&self, text: &str) -> Vec<String> {
        match &self.pattern {
            TokenPattern::Default => tokenize(text).into_iter().map(|t| t.text).collect(),
            TokenPattern::Custom { regex, group: true } => regex
                .captures_iter(text)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
                .collect(),
            TokenPattern::Custom {
                regex,
                group: false,
            } => regex.find_iter(text).map(|m| m.as_str().to_string()).collect(),
        }
    }

    fn word_ngrams(&self, mut tokens: Vec<String>) -> Vec<String> {
        if let Some(stop_words) = &self.stop_words {
            tokens.retain(|token| !stop_words.contains(token));
        }

        let (mut min_n, max_n) = self.config.ngram_range;
        if max_n == 1 {
            return tokens;
        }

        let original = tokens;
        let mut terms = Vec::with_capacity(original.len() * (max_n - min_n + 1));
        if min_n == 1 {
            terms.extend(original.iter().cloned());
            min_n += 1;
        }

        let upper = max_n.min(original.len());
        for n in min_n..=upper {
            for window in original.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    fn char_ngrams(&self, text: &str) -> Vec<String> {
        let text = collapse_whitespace_runs(text);
        let chars: Vec<char> = text.chars().collect();
        let (mut min_n, max_n) = self.config.ngram_range;

        let mut terms = Vec::new();
        if min_n == 1 {
            terms.extend(chars.iter().map(|ch| ch.to_string()));
            min_n += 1;
        }

        let upper = max_n.min(chars.len());
        for n in min_n..=upper {
            for window in chars.windows(n) {
                terms.push(window.iter().collect());
            }
        }
        terms
    }

    fn char_wb_ngrams(&self, text: &str) -> Vec<String> {
        let text = collapse_whitespace_runs(text);
        let (min_n, max_n) = self.config.ngram_range;

        let mut terms = Vec::new();
        for word in text.split_whitespace() {
            let mut padded = Vec::with_capacity(word.len() + 2);
            padded.push(' ');
            padded.extend(word.chars());
            padded.push(' ');
            let len = padded.len();

            for n in min_n..=max_n {
                let mut offset = 0;
                terms.push(slice_chars(&padded, offset, n));
                while offset + n < len {
                    offset += 1;
                    terms.push(slice_chars(&padded, offset, n));
                }
                // The whole padded word fit in one n-gram; longer n adds nothing new.
                if offset == 0 {
                    break;
                }
            }
        }
        terms
    }
}

/// Convenience wrapper: compiles `cfg` and analyzes a single text.
///
/// ```rust
/// use canonical::{analyze, AnalyzerConfig};
///
/// let cfg = AnalyzerConfig {
///     ngram_range: (1, 2),
///     ..Default::default()
/// };
/// let terms = analyze("Not GOOD at all", &cfg).unwrap();
/// assert_eq!(terms, vec!["not", "good", "at", "all", "not good", "good at", "at all"]);
/// ```
pub fn analyze(text: &str, cfg: &AnalyzerConfig) -> Result<Vec<String>, AnalyzerError> {
    Ok(Analyzer::new(cfg.clone())?.analyze(text))
}

fn compile_pattern(pattern: &str) -> Result<TokenPattern, AnalyzerError> {
    let regex = Regex::new(pattern).map_err(|err| AnalyzerError::InvalidTokenPattern {
        pattern: pattern.to_string(),
        reason: err.to_string(),
    })?;

    // captures_len counts the implicit whole-match group.
    match regex.captures_len() {
        1 => Ok(TokenPattern::Custom {
            regex,
            group: false,
        }),
        2 => Ok(TokenPattern::Custom { regex, group: true }),
        _ => Err(AnalyzerError::InvalidTokenPattern {
            pattern: pattern.to_string(),
            reason: "more than one capturing group".into(),
        }),
    }
}

/// Up to `n` chars starting at `offset`; shorter at the end of the slice.
fn slice_chars(chars: &[char], offset: usize, n: usize) -> String {
    let end = (offset + n).min(chars.len());
    chars[offset..end].iter().collect()
}
