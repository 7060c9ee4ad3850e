//! Whitespace utilities.
//!
//! Both helpers use Unicode's definition of whitespace (`char::is_whitespace`),
//! so tabs, newlines, carriage returns and non-breaking spaces all count.

use std::borrow::Cow;

/// Returns `true` when `text` is empty after trimming surrounding whitespace.
///
/// This is the emptiness check applied to submitted reviews before any
/// inference runs.
///
/// ```rust
/// use canonical::is_blank;
///
/// assert!(is_blank(""));
/// assert!(is_blank(" \t\r\n\u{00A0}"));
/// assert!(!is_blank("  fine  "));
/// ```
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Replaces every run of two or more whitespace characters with a single
/// ASCII space. A lone whitespace character is kept as-is, and edges are not
/// trimmed.
///
/// Character n-gram analyzers run this before slicing so that layout noise
/// does not produce distinct features.
///
/// ```rust
/// use canonical::collapse_whitespace_runs;
///
/// assert_eq!(collapse_whitespace_runs("a  b\tc"), "a b\tc");
/// assert_eq!(collapse_whitespace_runs("  x \n\n y"), " x y");
/// ```
pub fn collapse_whitespace_runs(text: &str) -> Cow<'_, str> {
    let mut chars = text.chars().peekable();
    let mut needs_rewrite = false;
    while let Some(ch) = chars.next() {
        if ch.is_whitespace() && chars.peek().is_some_and(|next| next.is_whitespace()) {
            needs_rewrite = true;
            break;
        }
    }
    if !needs_rewrite {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut run: Option<char> = None;
    let mut run_len = 0usize;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if run.is_none() {
                run = Some(ch);
            }
            run_len += 1;
            continue;
        }
        flush_run(&mut out, run.take(), run_len);
        run_len = 0;
        out.push(ch);
    }
    flush_run(&mut out, run, run_len);

    Cow::Owned(out)
}

fn flush_run(out: &mut String, first: Option<char>, len: usize) {
    match (first, len) {
        (Some(ch), 1) => out.push(ch),
        (Some(_), _) => out.push(' '),
        (None, _) => {}
    }
}
