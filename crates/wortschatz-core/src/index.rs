use std::cmp::Ordering;
use std::ops::Index;

use kanal::{Receiver, Sender};

use crate::collation::Collation;
use crate::entry::Entry;
use crate::error::IndexError;
use crate::types::IndexChange;

/// Entries kept in collation order at all times
///
/// Entries only enter through [`insert`](Self::insert) and leave through
/// [`remove`](Self::remove). Positional writes are rejected with
/// [`IndexError::InvalidOperation`]. The index does not reject duplicate keys,
/// callers check [`contains`](Self::contains) first.
///
/// Every mutation bumps the generation and is published to all subscribers.
pub struct SortedIndex<C> {
    collation: C,
    entries: Vec<Entry>,
    generation: u64,
    subscribers: Vec<Sender<IndexChange>>,
}

impl<C: Collation> SortedIndex<C> {
    pub fn new(collation: C) -> Self {
        Self {
            collation,
            entries: Vec::new(),
            generation: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn collation(&self) -> &C {
        &self.collation
    }

    /// Build an entry classified by this index's collation
    pub fn entry(&self, headword: impl Into<String>, translation: impl Into<String>) -> Entry {
        Entry::new(headword, translation, &self.collation)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Incremented on every mutation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn at(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Register for change notifications, polled by the owner of the receiver
    pub fn subscribe(&mut self) -> Receiver<IndexChange> {
        let (tx, rx) = kanal::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Splice `entry` in at its binary-searched position
    pub fn insert(&mut self, entry: Entry) {
        let position = self.insertion_point(&entry);
        tracing::debug!("insert '{}' at {}", entry.headword(), position);

        self.entries.insert(position, entry.clone());
        self.generation += 1;
        self.publish(IndexChange::Inserted {
            position,
            entry,
            generation: self.generation,
        });
    }

    /// Remove the entry with the same key as `entry`
    pub fn remove(&mut self, entry: &Entry) -> Result<Entry, IndexError> {
        let position = self
            .find(entry)
            .ok_or_else(|| IndexError::NotFound(entry.headword().to_string()))?;

        let removed = self.entries.remove(position);
        tracing::debug!("remove '{}' from {}", removed.headword(), position);

        self.generation += 1;
        self.publish(IndexChange::Removed {
            position,
            entry: removed.clone(),
            generation: self.generation,
        });
        Ok(removed)
    }

    pub fn remove_word(&mut self, headword: &str) -> Result<Entry, IndexError> {
        let probe = self.entry(headword, "");
        self.remove(&probe)
    }

    pub fn position_of(&self, headword: &str) -> Option<usize> {
        self.find(&self.entry(headword, ""))
    }

    pub fn contains(&self, headword: &str) -> bool {
        self.position_of(headword).is_some()
    }

    pub fn get(&self, headword: &str) -> Option<&Entry> {
        self.position_of(headword).map(|i| &self.entries[i])
    }

    /// Change a translation in place; order is unaffected
    ///
    /// Returns `Ok(false)` when the translation was already `translation`.
    pub fn set_translation(
        &mut self,
        headword: &str,
        translation: impl Into<String>,
    ) -> Result<bool, IndexError> {
        let position = self
            .position_of(headword)
            .ok_or_else(|| IndexError::NotFound(headword.to_string()))?;

        if !self.entries[position].set_translation(translation) {
            return Ok(false);
        }

        self.generation += 1;
        self.publish(IndexChange::Updated {
            position,
            entry: self.entries[position].clone(),
            generation: self.generation,
        });
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation += 1;
        self.publish(IndexChange::Reset {
            generation: self.generation,
        });
    }

    /// Always fails: replacing by position could break the order
    pub fn replace_at(&mut self, _index: usize, _entry: Entry) -> Result<(), IndexError> {
        Err(IndexError::InvalidOperation(
            "cannot assign to a position of a sorted collection",
        ))
    }

    /// Always fails: positions are chosen by the comparator
    pub fn insert_at(&mut self, _index: usize, _entry: Entry) -> Result<(), IndexError> {
        Err(IndexError::InvalidOperation(
            "cannot manually choose an index for a sorted collection",
        ))
    }

    /// Always fails: positions are chosen by the comparator
    pub fn move_index(&mut self, _from: usize, _to: usize) -> Result<(), IndexError> {
        Err(IndexError::InvalidOperation(
            "cannot manually change the index of items in a sorted collection",
        ))
    }

    /// Always fails: add elements one by one with [`insert`](Self::insert)
    pub fn concat<I>(&mut self, _other: I) -> Result<(), IndexError>
    where
        I: IntoIterator<Item = Entry>,
    {
        Err(IndexError::InvalidOperation(
            "cannot concatenate another collection to a sorted collection",
        ))
    }

    /// Binary search; an equal probe is the insertion point itself
    fn insertion_point(&self, entry: &Entry) -> usize {
        let mut lower = 0;
        let mut upper = self.entries.len();

        while lower < upper {
            let mid = lower + (upper - lower) / 2;
            match self.collation.compare(entry, &self.entries[mid]) {
                Ordering::Equal => return mid,
                Ordering::Greater => lower = mid + 1,
                Ordering::Less => upper = mid,
            }
        }

        lower
    }

    /// Position of the entry with the same key, searching only the run of
    /// entries that compare equal to it
    fn find(&self, probe: &Entry) -> Option<usize> {
        let start = self
            .entries
            .partition_point(|e| self.collation.compare(e, probe) == Ordering::Less);

        self.entries[start..]
            .iter()
            .take_while(|e| self.collation.compare(e, probe) == Ordering::Equal)
            .position(|e| e == probe)
            .map(|offset| start + offset)
    }

    fn publish(&mut self, change: IndexChange) {
        // Drop subscribers whose receiver is gone
        self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
    }
}

impl<C: Collation> Index<usize> for SortedIndex<C> {
    type Output = Entry;

    fn index(&self, index: usize) -> &Entry {
        &self.entries[index]
    }
}

impl<'a, C: Collation> IntoIterator for &'a SortedIndex<C> {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestCollation;

    fn index_with(words: &[&str]) -> SortedIndex<TestCollation> {
        let mut index = SortedIndex::new(TestCollation);
        for word in words {
            let entry = index.entry(*word, "");
            index.insert(entry);
        }
        index
    }

    fn headwords(index: &SortedIndex<TestCollation>) -> Vec<&str> {
        index.iter().map(|e| e.headword()).collect()
    }

    fn assert_sorted(index: &SortedIndex<TestCollation>) {
        for pair in index.entries().windows(2) {
            assert_ne!(
                index.collation().compare(&pair[0], &pair[1]),
                Ordering::Greater,
                "{} before {}",
                pair[0].headword(),
                pair[1].headword()
            );
        }
    }

    #[test]
    fn test_insert_keeps_order() {
        let index = index_with(&["Apfel", "Banane", "der Hund", "die Katze"]);
        assert_eq!(headwords(&index), ["Apfel", "Banane", "der Hund", "die Katze"]);
    }

    #[test]
    fn test_insert_reverse_and_mixed_order() {
        let index = index_with(&[
            "Zebra", "die Katze", "machen", "das Auto", "sich waschen", "der Hund", "Banane",
            "gehen", "die Übung", "alt",
        ]);
        assert_sorted(&index);
        assert_eq!(index.len(), 10);
        assert_eq!(index[0].headword(), "alt");
        assert_eq!(index[1].headword(), "das Auto");
    }

    #[test]
    fn test_equal_key_lands_at_probe_position() {
        let mut index = index_with(&["Apfel", "Haus", "Zebra"]);
        let entry = index.entry("das Haus", "");
        index.insert(entry);

        assert_eq!(headwords(&index), ["Apfel", "das Haus", "Haus", "Zebra"]);
        assert_sorted(&index);
    }

    #[test]
    fn test_at_reads_by_position() {
        let index = index_with(&["die Katze", "Apfel"]);
        assert_eq!(index.at(0).map(|e| e.headword()), Some("Apfel"));
        assert_eq!(index.at(1).map(|e| e.headword()), Some("die Katze"));
        assert!(index.at(2).is_none());
    }

    #[test]
    fn test_contains_and_get_are_case_insensitive() {
        let index = index_with(&["der Hund", "Katze"]);
        assert!(index.contains("DER HUND"));
        assert!(index.contains("katze"));
        assert!(!index.contains("Hund"));
        assert_eq!(index.get("der hund").map(|e| e.headword()), Some("der Hund"));
        assert_eq!(index.position_of("katze"), Some(1));
    }

    #[test]
    fn test_remove_finds_by_key() {
        let mut index = index_with(&["Apfel", "der See", "die See", "Zebra"]);
        let removed = index.remove_word("DIE SEE").unwrap();

        assert_eq!(removed.headword(), "die See");
        assert_eq!(headwords(&index), ["Apfel", "der See", "Zebra"]);
    }

    #[test]
    fn test_remove_missing_is_not_found_and_leaves_index_unchanged() {
        let mut index = index_with(&["Apfel", "Banane"]);
        let generation = index.generation();

        let result = index.remove_word("Kirsche");

        assert_eq!(result, Err(IndexError::NotFound("Kirsche".to_string())));
        assert_eq!(headwords(&index), ["Apfel", "Banane"]);
        assert_eq!(index.generation(), generation);
        assert_sorted(&index);
    }

    #[test]
    fn test_positional_writes_are_rejected() {
        let mut index = index_with(&["Apfel", "Banane"]);
        let entry = index.entry("Kirsche", "");

        assert!(matches!(
            index.replace_at(0, entry.clone()),
            Err(IndexError::InvalidOperation(_))
        ));
        assert!(matches!(
            index.insert_at(0, entry.clone()),
            Err(IndexError::InvalidOperation(_))
        ));
        assert!(matches!(index.move_index(0, 1), Err(IndexError::InvalidOperation(_))));
        assert!(matches!(
            index.concat(vec![entry]),
            Err(IndexError::InvalidOperation(_))
        ));
        assert_eq!(headwords(&index), ["Apfel", "Banane"]);
    }

    #[test]
    fn test_set_translation_does_not_reorder() {
        let mut index = index_with(&["Apfel", "Banane"]);
        assert_eq!(index.set_translation("apfel", "apple"), Ok(true));
        assert_eq!(index.set_translation("apfel", "apple"), Ok(false));
        assert!(index.set_translation("Kirsche", "cherry").is_err());
        assert_eq!(index[0].translation(), "apple");
        assert_eq!(headwords(&index), ["Apfel", "Banane"]);
    }

    #[test]
    fn test_subscribers_receive_changes_in_order() {
        let mut index = SortedIndex::new(TestCollation);
        let rx = index.subscribe();

        let entry = index.entry("Banane", "");
        index.insert(entry);
        let entry = index.entry("Apfel", "");
        index.insert(entry);
        index.remove_word("Banane").unwrap();
        index.clear();

        match rx.try_recv().unwrap() {
            Some(IndexChange::Inserted { position, entry, generation }) => {
                assert_eq!(position, 0);
                assert_eq!(entry.headword(), "Banane");
                assert_eq!(generation, 1);
            }
            other => panic!("Wrong change: {:?}", other),
        }
        match rx.try_recv().unwrap() {
            Some(IndexChange::Inserted { position, .. }) => assert_eq!(position, 0),
            other => panic!("Wrong change: {:?}", other),
        }
        match rx.try_recv().unwrap() {
            Some(IndexChange::Removed { position, .. }) => assert_eq!(position, 1),
            other => panic!("Wrong change: {:?}", other),
        }
        match rx.try_recv().unwrap() {
            Some(IndexChange::Reset { generation }) => assert_eq!(generation, 4),
            other => panic!("Wrong change: {:?}", other),
        }
        assert!(rx.try_recv().unwrap().is_none());
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut index = SortedIndex::new(TestCollation);
        let rx = index.subscribe();
        drop(rx);

        let entry = index.entry("Apfel", "");
        index.insert(entry);
        assert!(index.subscribers.is_empty());
    }
}
