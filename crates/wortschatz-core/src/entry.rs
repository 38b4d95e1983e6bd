use std::fmt;
use std::hash::{Hash, Hasher};

use crate::collation::Collation;

/// Dictionary entry: a headword with its translation
///
/// Equality and hashing use the case-folded headword only, so two entries
/// with the same word but different translations are the same key.
#[derive(Debug, Clone)]
pub struct Entry {
    headword: String,
    key: String,
    is_noun: bool,
    translation: String,
}

impl Entry {
    /// Create an entry, classifying the headword once with `collation`
    pub fn new(
        headword: impl Into<String>,
        translation: impl Into<String>,
        collation: &(impl Collation + ?Sized),
    ) -> Self {
        let headword = headword.into();
        let key = collation.fold(&headword);
        let is_noun = collation.classify(&headword);

        Self {
            headword,
            key,
            is_noun,
            translation: translation.into(),
        }
    }

    pub fn headword(&self) -> &str {
        &self.headword
    }

    /// Case-folded headword
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_classified_noun(&self) -> bool {
        self.is_noun
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    /// Replace the translation, returns false if it was unchanged
    pub fn set_translation(&mut self, translation: impl Into<String>) -> bool {
        let translation = translation.into();
        if self.translation == translation {
            return false;
        }
        self.translation = translation;
        true
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.headword, self.translation)
    }
}
