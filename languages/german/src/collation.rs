use once_cell::sync::Lazy;
use regex::Regex;
use wortschatz_core::Collation;

/// Placeholder translation for newly added words
pub const NO_TRANSLATION: &str = "KEINE ÜBERSETZUNG";

/// "der ", "die " or "das " is dropped from nouns when sorting
const ARTICLE_STRIP_LEN: usize = 4;

// der, die or das, a space and then a word character
static NOUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^d(?:er|ie|as) \w").expect("valid regex"));

// Optional "sich " and a word ending with "en"
static VERB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:sich )?\w+en\b").expect("valid regex"));

static REFLEXIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^sich \w").expect("valid regex"));

static EN_ENDING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\w+en\b").expect("valid regex"));

/// German headword collation
///
/// Nouns are written with their article ("der Hund") and sort under the
/// noun itself, so "der Hund" sits between "Haus" and "Katze".
#[derive(Debug, Clone, Copy, Default)]
pub struct GermanCollation;

impl GermanCollation {
    pub fn new() -> Self {
        Self
    }
}

impl Collation for GermanCollation {
    fn classify(&self, headword: &str) -> bool {
        NOUN.is_match(headword)
    }

    fn article_strip_len(&self) -> usize {
        ARTICLE_STRIP_LEN
    }

    fn is_verb(&self, headword: &str) -> bool {
        VERB.is_match(headword)
    }

    fn is_uncategorized(&self, headword: &str) -> bool {
        !REFLEXIVE.is_match(headword) && !NOUN.is_match(headword) && !EN_ENDING.is_match(headword)
    }
}
