use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

use crate::entry::Entry;

/// Ordering and word-type classification for one language
///
/// Implementations decide which headwords are nouns (recognized by a leading
/// article), how many characters of such a headword are ignored when sorting,
/// and which headwords count as verbs for filtering.
pub trait Collation: Send + Sync {
    /// True if the headword starts with an article followed by a word
    fn classify(&self, headword: &str) -> bool;

    /// Characters stripped from a classified noun (article plus separator)
    fn article_strip_len(&self) -> usize;

    /// True if the headword looks like a verb infinitive
    fn is_verb(&self, headword: &str) -> bool;

    /// True if the headword is neither noun, verb nor reflexive phrase
    fn is_uncategorized(&self, headword: &str) -> bool;

    /// Case-folded form used for keys and matching
    fn fold(&self, text: &str) -> String {
        fold(text)
    }

    /// Comparison key: folded headword, without the article for nouns
    fn sort_key<'a>(&self, entry: &'a Entry) -> &'a str {
        if entry.is_classified_noun() {
            strip_chars(entry.key(), self.article_strip_len())
        } else {
            entry.key()
        }
    }

    /// Ordinal comparison of the two sort keys
    fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        self.sort_key(a).cmp(self.sort_key(b))
    }
}

/// NFC-normalize and lowercase
pub fn fold(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

/// Skip the first `count` characters, clamped to the end of the string
pub fn strip_chars(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((offset, _)) => &text[offset..],
        None => "",
    }
}
