use kanal::Receiver;

use crate::collation::Collation;
use crate::entry::Entry;
use crate::index::SortedIndex;
use crate::types::{FilterParams, IndexChange, WordType};

/// Filtered, order-preserving projection of a [`SortedIndex`]
///
/// The view holds positions into the index, never entries. It subscribes to
/// the index on creation and applies pending changes on every
/// [`sync`](Self::sync): inserted, removed and updated entries are re-checked
/// one at a time, while parameter changes, a reset or a lost change feed
/// fall back to a full rescan.
pub struct FilterView {
    params: FilterParams,
    needle: String,
    visible: Vec<usize>,
    changes: Receiver<IndexChange>,
    generation: u64,
    stale: bool,
}

impl FilterView {
    pub fn new<C: Collation>(index: &mut SortedIndex<C>, params: FilterParams) -> Self {
        let changes = index.subscribe();
        let needle = index.collation().fold(&params.search_text);

        let mut view = Self {
            params,
            needle,
            visible: Vec::new(),
            changes,
            generation: index.generation(),
            stale: true,
        };
        view.rescan(index);
        view
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    pub fn set_word_type(&mut self, word_type: WordType) {
        if self.params.word_type != word_type {
            self.params.word_type = word_type;
            self.stale = true;
        }
    }

    pub fn set_search_text(&mut self, search_text: impl Into<String>) {
        let search_text = search_text.into();
        if self.params.search_text != search_text {
            self.params.search_text = search_text;
            self.stale = true;
        }
    }

    pub fn set_match_translation(&mut self, match_translation: bool) {
        if self.params.match_translation != match_translation {
            self.params.match_translation = match_translation;
            self.stale = true;
        }
    }

    pub fn set_params(&mut self, params: FilterParams) {
        if self.params != params {
            self.params = params;
            self.stale = true;
        }
    }

    /// Bring the view up to date with `index` and read it
    ///
    /// `index` must be the index this view was created from.
    pub fn sync<'a, C: Collation>(&'a mut self, index: &'a SortedIndex<C>) -> Projection<'a, C> {
        self.drain(index);

        if self.stale || self.generation != index.generation() {
            self.rescan(index);
        }

        Projection {
            index,
            positions: &self.visible,
        }
    }

    /// True if `entry` passes the current word-type and text predicates
    ///
    /// Works on the parameters as set, synced or not.
    pub fn matches<C: Collation>(&self, collation: &C, entry: &Entry) -> bool {
        let needle = collation.fold(&self.params.search_text);
        passes(collation, &self.params, &needle, entry)
    }

    fn drain<C: Collation>(&mut self, index: &SortedIndex<C>) {
        loop {
            match self.changes.try_recv() {
                Ok(Some(change)) => {
                    self.generation = change.generation();

                    if !self.stale {
                        self.apply(index.collation(), change);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("filter view lost its change feed: {}", e);
                    self.stale = true;
                    break;
                }
            }
        }
    }

    fn apply<C: Collation>(&mut self, collation: &C, change: IndexChange) {
        match change {
            IndexChange::Inserted {
                position, entry, ..
            } => {
                for p in self.visible.iter_mut().filter(|p| **p >= position) {
                    *p += 1;
                }
                if passes(collation, &self.params, &self.needle, &entry) {
                    let at = self.visible.partition_point(|p| *p < position);
                    self.visible.insert(at, position);
                }
            }
            IndexChange::Removed { position, .. } => {
                if let Ok(at) = self.visible.binary_search(&position) {
                    self.visible.remove(at);
                }
                for p in self.visible.iter_mut().filter(|p| **p > position) {
                    *p -= 1;
                }
            }
            IndexChange::Updated {
                position, entry, ..
            } => {
                let visible = passes(collation, &self.params, &self.needle, &entry);
                match self.visible.binary_search(&position) {
                    Ok(at) if !visible => {
                        self.visible.remove(at);
                    }
                    Err(at) if visible => self.visible.insert(at, position),
                    _ => {}
                }
            }
            IndexChange::Reset { .. } => self.stale = true,
        }
    }

    fn rescan<C: Collation>(&mut self, index: &SortedIndex<C>) {
        let collation = index.collation();
        self.needle = collation.fold(&self.params.search_text);

        let visible: Vec<usize> = index
            .iter()
            .enumerate()
            .filter(|(_, entry)| passes(collation, &self.params, &self.needle, entry))
            .map(|(position, _)| position)
            .collect();

        tracing::debug!(
            "filter rescan: {} of {} visible ({:?}, '{}')",
            visible.len(),
            index.len(),
            self.params.word_type,
            self.params.search_text
        );

        self.visible = visible;
        self.generation = index.generation();
        self.stale = false;
    }
}

fn passes<C: Collation>(collation: &C, params: &FilterParams, needle: &str, entry: &Entry) -> bool {
    let headword = entry.headword();
    let is_word_type = match params.word_type {
        WordType::All => true,
        WordType::Nouns => entry.is_classified_noun(),
        WordType::Verbs => collation.is_verb(headword),
        WordType::AllButNounsAndVerbs => collation.is_uncategorized(headword),
    };
    if !is_word_type {
        return false;
    }

    if params.match_translation {
        collation.fold(entry.translation()).contains(needle)
    } else {
        // Nouns match with or without their article
        entry.key().starts_with(needle) || collation.sort_key(entry).starts_with(needle)
    }
}

/// Read access to the visible entries, in index order
pub struct Projection<'a, C> {
    index: &'a SortedIndex<C>,
    positions: &'a [usize],
}

impl<C> Clone for Projection<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Projection<'_, C> {}

impl<'a, C: Collation> Projection<'a, C> {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions of the visible entries in the index
    pub fn positions(&self) -> &'a [usize] {
        self.positions
    }

    pub fn get(&self, i: usize) -> Option<&'a Entry> {
        let index = self.index;
        self.positions.get(i).map(|&p| &index[p])
    }

    /// First visible entry, used to reset a selection
    pub fn first(&self) -> Option<&'a Entry> {
        self.get(0)
    }

    pub fn contains(&self, headword: &str) -> bool {
        self.index
            .position_of(headword)
            .is_some_and(|p| self.positions.binary_search(&p).is_ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Entry> {
        let index = self.index;
        self.positions.iter().map(move |&p| &index[p])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestCollation;

    const WORDS: &[(&str, &str)] = &[
        ("Apfel", "apple"),
        ("die Blume", "flower"),
        ("gehen", "to go"),
        ("sich waschen", "to wash oneself"),
        ("der Hund", "dog"),
        ("schnell", "fast"),
        ("das Essen", "the food"),
        ("Banane", "banana"),
    ];

    fn index() -> SortedIndex<TestCollation> {
        let mut index = SortedIndex::new(TestCollation);
        for (word, translation) in WORDS {
            let entry = index.entry(*word, *translation);
            index.insert(entry);
        }
        index
    }

    fn visible(view: &mut FilterView, index: &SortedIndex<TestCollation>) -> Vec<String> {
        view.sync(index)
            .iter()
            .map(|e| e.headword().to_string())
            .collect()
    }

    fn params(word_type: WordType, search_text: &str, match_translation: bool) -> FilterParams {
        FilterParams {
            word_type,
            search_text: search_text.to_string(),
            match_translation,
        }
    }

    #[test]
    fn test_unfiltered_view_equals_index() {
        let mut index = index();
        let mut view = FilterView::new(&mut index, FilterParams::default());

        let all: Vec<String> = index.iter().map(|e| e.headword().to_string()).collect();
        assert_eq!(visible(&mut view, &index), all);
    }

    #[test]
    fn test_noun_prefix_matches_with_and_without_article() {
        let mut index = index();
        let mut view = FilterView::new(&mut index, params(WordType::All, "Blu", false));
        assert_eq!(visible(&mut view, &index), ["die Blume"]);

        view.set_search_text("die");
        assert_eq!(visible(&mut view, &index), ["die Blume"]);

        view.set_search_text("BL");
        assert_eq!(visible(&mut view, &index), ["die Blume"]);
    }

    #[test]
    fn test_translation_mode_uses_substring() {
        let mut index = index();
        let mut view = FilterView::new(&mut index, params(WordType::All, "WASH", true));
        assert_eq!(visible(&mut view, &index), ["sich waschen"]);

        view.set_search_text("o");
        let shown = visible(&mut view, &index);
        assert!(shown.contains(&"gehen".to_string()));
        assert!(shown.contains(&"der Hund".to_string()));
        assert!(shown.contains(&"die Blume".to_string()));
        assert!(!shown.contains(&"Apfel".to_string()));
    }

    #[test]
    fn test_word_types() {
        let mut index = index();
        let mut view = FilterView::new(&mut index, params(WordType::Nouns, "", false));
        assert_eq!(visible(&mut view, &index), ["die Blume", "das Essen", "der Hund"]);

        view.set_word_type(WordType::Verbs);
        assert_eq!(visible(&mut view, &index), ["gehen", "sich waschen"]);

        view.set_word_type(WordType::AllButNounsAndVerbs);
        assert_eq!(visible(&mut view, &index), ["Apfel", "Banane", "schnell"]);
    }

    #[test]
    fn test_word_type_and_text_combine() {
        let mut index = index();
        let mut view = FilterView::new(&mut index, params(WordType::Verbs, "ge", false));
        assert_eq!(visible(&mut view, &index), ["gehen"]);

        view.set_word_type(WordType::Nouns);
        assert!(visible(&mut view, &index).is_empty());
    }

    #[test]
    fn test_incremental_updates_match_rescan() {
        let mut index = index();
        let mut view = FilterView::new(&mut index, params(WordType::All, "s", false));

        for word in ["sagen", "die Sonne", "Zebra", "der Schuh"] {
            let entry = index.entry(word, "");
            index.insert(entry);
        }
        index.remove_word("schnell").unwrap();
        index.remove_word("Apfel").unwrap();

        let incremental = visible(&mut view, &index);

        let mut fresh = FilterView::new(&mut index, params(WordType::All, "s", false));
        assert_eq!(incremental, visible(&mut fresh, &index));
        assert_eq!(incremental, ["sagen", "der Schuh", "sich waschen", "die Sonne"]);
    }

    #[test]
    fn test_view_is_subsequence_of_index() {
        let mut index = index();
        let mut view = FilterView::new(&mut index, params(WordType::All, "", false));
        let entry = index.entry("der Apfelbaum", "");
        index.insert(entry);

        let projection = view.sync(&index);
        let positions = projection.positions();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(projection.len(), index.len());
    }

    #[test]
    fn test_translation_update_rechecks_entry() {
        let mut index = index();
        let mut view = FilterView::new(&mut index, params(WordType::All, "hound", true));
        assert!(visible(&mut view, &index).is_empty());

        index.set_translation("der hund", "dog, hound").unwrap();
        assert_eq!(visible(&mut view, &index), ["der Hund"]);

        index.set_translation("der hund", "dog").unwrap();
        assert!(visible(&mut view, &index).is_empty());
    }

    #[test]
    fn test_clear_empties_view() {
        let mut index = index();
        let mut view = FilterView::new(&mut index, FilterParams::default());
        index.clear();
        assert!(view.sync(&index).is_empty());

        let entry = index.entry("Apfel", "");
        index.insert(entry);
        assert_eq!(visible(&mut view, &index), ["Apfel"]);
    }

    #[test]
    fn test_first_and_contains() {
        let mut index = index();
        let mut view = FilterView::new(&mut index, params(WordType::Nouns, "", false));
        let projection = view.sync(&index);

        assert_eq!(projection.first().map(|e| e.headword()), Some("die Blume"));
        assert!(projection.contains("DER HUND"));
        assert!(!projection.contains("gehen"));
        assert!(!projection.contains("Kirsche"));
    }

    #[test]
    fn test_matches_follows_new_search_text_before_sync() {
        let mut index = index();
        let mut view = FilterView::new(&mut index, FilterParams::default());
        let apfel = index.get("apfel").unwrap();
        let blume = index.get("die blume").unwrap();
        assert!(view.matches(index.collation(), apfel));

        view.set_search_text("Blu");
        assert!(!view.matches(index.collation(), apfel));
        assert!(view.matches(index.collation(), blume));
        assert_eq!(visible(&mut view, &index), ["die Blume"]);
    }

    #[test]
    fn test_lost_change_feed_falls_back_to_rescan() {
        let mut old = index();
        let mut view = FilterView::new(&mut old, params(WordType::All, "b", false));
        drop(old);

        let mut replacement = SortedIndex::new(TestCollation);
        for word in ["Kirsche", "die Bohne", "Birne"] {
            let entry = replacement.entry(word, "");
            replacement.insert(entry);
        }
        assert_eq!(visible(&mut view, &replacement), ["Birne", "die Bohne"]);
    }
}
