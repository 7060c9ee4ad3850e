use std::borrow::Cow;

use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

use crate::config::StripAccents;

/// Applies the configured accent stripping. ASCII input is returned untouched.
pub(crate) fn strip_accents(text: &str, mode: StripAccents) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }
    match mode {
        StripAccents::Unicode => Cow::Owned(
            text.nfkd()
                .filter(|ch| canonical_combining_class(*ch) == 0)
                .collect(),
        ),
        StripAccents::Ascii => Cow::Owned(text.nfkd().filter(char::is_ascii).collect()),
    }
}
