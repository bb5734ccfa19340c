#![forbid(unsafe_code)]

//! Ordered entry collections and selection bookkeeping.

use crate::entry::Entry;
use std::collections::BTreeSet;

/// An ordered sequence of entries, indexed `0..len`.
///
/// Order is semantically significant: it is the order rendered to the user
/// and the order serialized on submit. The list-level `disabled` flag
/// mirrors a fully disabled select element; it gates the bulk-transfer
/// predicates regardless of the per-entry flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    entries: Vec<Entry>,
    disabled: bool,
}

impl Collection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection from the given entries.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = impl Into<Entry>>) -> Self {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            disabled: false,
        }
    }

    /// Set the list-level disabled flag.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Whether the whole collection is disabled.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// The entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The entry values in display order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Entry::value)
    }

    /// Whether at least one entry is enabled.
    #[must_use]
    pub fn has_enabled_entry(&self) -> bool {
        self.entries.iter().any(|entry| !entry.is_disabled())
    }

    /// Append an entry.
    pub fn push(&mut self, entry: impl Into<Entry>) {
        self.entries.push(entry.into());
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Entry {
        self.entries.remove(index)
    }

    pub(crate) fn insert_at(&mut self, index: usize, entry: Entry) {
        self.entries.insert(index, entry);
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
    }
}

impl From<Vec<Entry>> for Collection {
    fn from(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            disabled: false,
        }
    }
}

/// The set of indices currently marked selected within one [`Collection`].
///
/// A selection is ephemeral: it is recomputed by every operation and never
/// outlives one gesture. Marks that do not correspond to a live entry
/// (out-of-range, or pointing at a disabled entry where that matters) are
/// dropped by normalization before an operation looks at them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    marks: BTreeSet<usize>,
}

impl SelectionSet {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an index as selected.
    pub fn insert(&mut self, index: usize) {
        self.marks.insert(index);
    }

    /// Unmark an index.
    pub fn remove(&mut self, index: usize) {
        self.marks.remove(&index);
    }

    /// Whether the index is marked.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.marks.contains(&index)
    }

    /// Clear every mark.
    pub fn clear(&mut self) {
        self.marks.clear();
    }

    /// Number of marks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Whether no index is marked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// The lowest marked index, if any.
    #[must_use]
    pub fn first(&self) -> Option<usize> {
        self.marks.first().copied()
    }

    /// Marked indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.marks.iter().copied()
    }

    /// Marked indices collected in ascending order.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        self.marks.iter().copied().collect()
    }

    /// Drop marks that do not point at an entry of `collection`.
    pub fn normalize(&mut self, collection: &Collection) {
        self.marks.retain(|&index| index < collection.len());
    }

    /// Drop marks that do not point at an *enabled* entry of `collection`.
    ///
    /// This is the pre-transfer pass: disabled entries must never move,
    /// even if the caller handed in a mark for one.
    pub fn normalize_enabled(&mut self, collection: &Collection) {
        self.marks.retain(|&index| {
            collection
                .get(index)
                .is_some_and(|entry| !entry.is_disabled())
        });
    }

    /// Shift marks to account for an insertion at `index`: every mark at
    /// or above it moves up by one.
    pub(crate) fn shift_for_insert(&mut self, index: usize) {
        self.marks = self
            .marks
            .iter()
            .map(|&mark| if mark >= index { mark + 1 } else { mark })
            .collect();
    }
}

impl FromIterator<usize> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            marks: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Collection {
        Collection::from_entries([
            Entry::new("A", "a"),
            Entry::new("B", "b").disabled(true),
            Entry::new("C", "c"),
        ])
    }

    #[test]
    fn normalize_drops_out_of_range() {
        let collection = sample();
        let mut selection: SelectionSet = [0, 2, 7].into_iter().collect();
        selection.normalize(&collection);
        assert_eq!(selection.indices(), vec![0, 2]);
    }

    #[test]
    fn normalize_enabled_also_drops_disabled() {
        let collection = sample();
        let mut selection: SelectionSet = [0, 1, 2, 9].into_iter().collect();
        selection.normalize_enabled(&collection);
        assert_eq!(selection.indices(), vec![0, 2]);
    }

    #[test]
    fn shift_for_insert_moves_marks_at_or_after() {
        let mut selection: SelectionSet = [0, 2, 4].into_iter().collect();
        selection.shift_for_insert(2);
        assert_eq!(selection.indices(), vec![0, 3, 5]);
    }

    #[test]
    fn has_enabled_entry_ignores_disabled() {
        let all_disabled = Collection::from_entries([Entry::new("X", "x").disabled(true)]);
        assert!(!all_disabled.has_enabled_entry());
        assert!(sample().has_enabled_entry());
    }

    #[test]
    fn values_in_display_order() {
        let collection = sample();
        assert_eq!(collection.values().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }
}
