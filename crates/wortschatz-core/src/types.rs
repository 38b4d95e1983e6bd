use crate::entry::Entry;

/// Change notification emitted by the sorted index
///
/// `generation` is the index generation right after the change.
#[derive(Debug, Clone)]
pub enum IndexChange {
    Inserted {
        position: usize,
        entry: Entry,
        generation: u64,
    },
    Removed {
        position: usize,
        entry: Entry,
        generation: u64,
    },
    /// Translation changed in place, order unaffected
    Updated {
        position: usize,
        entry: Entry,
        generation: u64,
    },
    /// Everything changed (clear)
    Reset { generation: u64 },
}

impl IndexChange {
    pub fn generation(&self) -> u64 {
        match self {
            IndexChange::Inserted { generation, .. }
            | IndexChange::Removed { generation, .. }
            | IndexChange::Updated { generation, .. }
            | IndexChange::Reset { generation } => *generation,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WordType {
    #[default]
    All,
    Nouns,
    Verbs,
    AllButNounsAndVerbs,
}

impl WordType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(WordType::All),
            "nouns" | "noun" => Some(WordType::Nouns),
            "verbs" | "verb" => Some(WordType::Verbs),
            "other" | "others" => Some(WordType::AllButNounsAndVerbs),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WordType::All => "all",
            WordType::Nouns => "nouns",
            WordType::Verbs => "verbs",
            WordType::AllButNounsAndVerbs => "other",
        }
    }
}

/// Predicate parameters of a [`FilterView`](crate::filter::FilterView)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    pub word_type: WordType,
    pub search_text: String,
    /// Match `search_text` against translations instead of headwords
    pub match_translation: bool,
}
