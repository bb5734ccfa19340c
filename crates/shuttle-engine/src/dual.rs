#![forbid(unsafe_code)]

//! Dual-list ("shuttle") selection transfer.
//!
//! Two collections, `available` and `selected`, exchange entries in
//! response to add / remove gestures. When the widget has no explicit
//! reorder controls, transferred entries are inserted at their canonical
//! rank so the selected list mirrors the server-supplied ordering; with
//! reorder controls present, additions append and the user arranges them.
//! After every mutation the serialized mirror is recomputed from the
//! selected collection so the transport field always reflects on-screen
//! state.

use crate::collection::{Collection, SelectionSet};
use crate::entry::Entry;
use crate::order::CanonicalOrder;
use crate::shift;
use crate::{Controls, Outcome};
use shuttle_codec::ListCodec;

/// Per-widget configuration for the dual-list selector.
///
/// Holds no per-gesture state; operations take the [`DualListState`] by
/// mutable reference, in the widget/state split used throughout this
/// workspace.
#[derive(Debug, Clone, Default)]
pub struct DualList {
    codec: ListCodec,
    canonical: Option<CanonicalOrder>,
    order_controls: bool,
    duplicate_selections: bool,
}

impl DualList {
    /// Create a dual-list engine over the given wire codec.
    #[must_use]
    pub fn new(codec: ListCodec) -> Self {
        Self {
            codec,
            canonical: None,
            order_controls: false,
            duplicate_selections: false,
        }
    }

    /// Supply the canonical value order used for sort-on-transfer.
    #[must_use]
    pub fn canonical_order(mut self, order: CanonicalOrder) -> Self {
        self.canonical = Some(order);
        self
    }

    /// Declare whether the widget has explicit move-up/move-down controls.
    ///
    /// When it does, additions append instead of sorting: the user owns
    /// the selected order.
    #[must_use]
    pub fn order_controls(mut self, present: bool) -> Self {
        self.order_controls = present;
        self
    }

    /// Enable duplicate-selections mode: adding clones entries into the
    /// selected list (leaving `available` intact, duplicates legal) and
    /// removing discards them.
    #[must_use]
    pub fn duplicate_selections(mut self, enabled: bool) -> Self {
        self.duplicate_selections = enabled;
        self
    }

    /// Build a state from initial collections, with the serialized mirror
    /// already in sync.
    #[must_use]
    pub fn state(&self, available: Collection, selected: Collection) -> DualListState {
        let mut state = DualListState {
            available,
            selected,
            available_selection: SelectionSet::new(),
            selected_selection: SelectionSet::new(),
            submitted_value: String::new(),
        };
        self.sync_value(&mut state);
        state
    }

    /// Recompute the serialized mirror from the selected collection.
    ///
    /// Operations call this themselves; it is public for callers that
    /// restore persisted state or edit the collections directly.
    pub fn sync_value(&self, state: &mut DualListState) {
        let values: Vec<&str> = state.selected.values().collect();
        state.submitted_value = self.codec.join(&values);
    }

    fn sort_on_add(&self) -> bool {
        self.canonical.is_some() && !self.order_controls
    }

    /// Transfer the selected available entries into the selected list.
    ///
    /// Moved entries end up marked selected at their destination; the
    /// available selection is cleared, as is any stale mark on the
    /// selected list.
    pub fn add(&self, state: &mut DualListState) -> Outcome {
        state.available_selection.normalize_enabled(&state.available);
        if state.available_selection.is_empty() {
            return Outcome::Unchanged;
        }
        state.selected_selection.clear();

        let moved = if self.duplicate_selections {
            clone_marked(
                &state.available,
                &mut state.available_selection,
                &mut state.selected,
                &mut state.selected_selection,
                self.sort_on_add(),
                self.canonical.as_ref(),
            )
        } else {
            transfer(
                &mut state.available,
                &mut state.available_selection,
                &mut state.selected,
                &mut state.selected_selection,
                self.sort_on_add(),
                self.canonical.as_ref(),
            )
        };

        self.sync_value(state);
        self.trace("add", moved, state);
        Outcome::Changed
    }

    /// Transfer the selected entries back to the available list.
    ///
    /// The available side is kept in canonical order whenever a canonical
    /// order is configured, independent of the reorder controls (those
    /// only ever govern the selected side).
    pub fn remove(&self, state: &mut DualListState) -> Outcome {
        state.selected_selection.normalize_enabled(&state.selected);
        if state.selected_selection.is_empty() {
            return Outcome::Unchanged;
        }
        state.available_selection.clear();

        let moved = if self.duplicate_selections {
            discard_marked(&mut state.selected, &mut state.selected_selection)
        } else {
            transfer(
                &mut state.selected,
                &mut state.selected_selection,
                &mut state.available,
                &mut state.available_selection,
                self.canonical.is_some(),
                self.canonical.as_ref(),
            )
        };

        self.sync_value(state);
        self.trace("remove", moved, state);
        Outcome::Changed
    }

    /// Select every enabled available entry, then transfer.
    pub fn add_all(&self, state: &mut DualListState) -> Outcome {
        if state.available.is_disabled() {
            return Outcome::Unchanged;
        }
        mark_enabled(&state.available, &mut state.available_selection);
        self.add(state)
    }

    /// Select every enabled selected entry, then transfer back.
    pub fn remove_all(&self, state: &mut DualListState) -> Outcome {
        if state.selected.is_disabled() {
            return Outcome::Unchanged;
        }
        mark_enabled(&state.selected, &mut state.selected_selection);
        self.remove(state)
    }

    /// Shift the selected run in the selected list one slot toward the
    /// front. Only meaningful when the widget has reorder controls.
    pub fn move_up(&self, state: &mut DualListState) -> Outcome {
        let changed = shift::shift_up(&mut state.selected, &mut state.selected_selection);
        if changed {
            self.sync_value(state);
            self.trace("move_up", 0, state);
        }
        Outcome::from_changed(changed)
    }

    /// Shift the selected run in the selected list one slot toward the
    /// back.
    pub fn move_down(&self, state: &mut DualListState) -> Outcome {
        let changed = shift::shift_down(&mut state.selected, &mut state.selected_selection);
        if changed {
            self.sync_value(state);
            self.trace("move_down", 0, state);
        }
        Outcome::from_changed(changed)
    }

    /// Pure control-enablement predicates over the current state.
    #[must_use]
    pub fn controls(&self, state: &DualListState) -> Controls {
        let mut flags = Controls::empty();

        if !state.available.is_empty()
            && marked_enabled_count(&state.available, &state.available_selection) > 0
        {
            flags |= Controls::ADD;
        }
        if !state.available.is_disabled() && state.available.has_enabled_entry() {
            flags |= Controls::ADD_ALL;
        }
        if !state.selected.is_empty()
            && marked_enabled_count(&state.selected, &state.selected_selection) > 0
        {
            flags |= Controls::REMOVE;
        }
        if !state.selected.is_disabled() && state.selected.has_enabled_entry() {
            flags |= Controls::REMOVE_ALL;
        }
        if shift::can_shift_up(&state.selected, &state.selected_selection) {
            flags |= Controls::MOVE_UP;
        }
        if shift::can_shift_down(&state.selected, &state.selected_selection) {
            flags |= Controls::MOVE_DOWN;
        }
        flags
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn trace(&self, op: &str, moved: usize, state: &DualListState) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "dual.transfer",
            op,
            moved,
            available = state.available.len(),
            selected = state.selected.len(),
            duplicate_selections = self.duplicate_selections,
        );
    }
}

/// Mutable state for a [`DualList`]: both collections, both selections,
/// and the serialized mirror of the selected values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DualListState {
    /// Entries not yet chosen.
    pub available: Collection,
    /// Entries chosen for submission, in display order.
    pub selected: Collection,
    /// Marks on `available`.
    pub available_selection: SelectionSet,
    /// Marks on `selected`.
    pub selected_selection: SelectionSet,
    submitted_value: String,
}

impl DualListState {
    /// The serialized value destined for the hidden transport field.
    ///
    /// Always reflects the selected collection as of the last mutating
    /// operation (or the last explicit [`DualList::sync_value`] call).
    #[must_use]
    pub fn submitted_value(&self) -> &str {
        &self.submitted_value
    }

    /// Snapshot the state for persistence.
    #[must_use]
    pub fn save_state(&self) -> DualListPersistState {
        DualListPersistState {
            available: self.available.entries().to_vec(),
            selected: self.selected.entries().to_vec(),
            available_disabled: self.available.is_disabled(),
            selected_disabled: self.selected.is_disabled(),
            available_selection: self.available_selection.indices(),
            selected_selection: self.selected_selection.indices(),
            submitted_value: self.submitted_value.clone(),
        }
    }

    /// Restore a previously saved snapshot.
    pub fn restore_state(&mut self, snapshot: DualListPersistState) {
        self.available =
            Collection::from_entries(snapshot.available).disabled(snapshot.available_disabled);
        self.selected =
            Collection::from_entries(snapshot.selected).disabled(snapshot.selected_disabled);
        self.available_selection = snapshot.available_selection.into_iter().collect();
        self.selected_selection = snapshot.selected_selection.into_iter().collect();
        self.submitted_value = snapshot.submitted_value;
    }
}

/// Persistable snapshot of a [`DualListState`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct DualListPersistState {
    /// Available entries in display order.
    pub available: Vec<Entry>,
    /// Selected entries in display order.
    pub selected: Vec<Entry>,
    /// List-level disabled flag of the available collection.
    pub available_disabled: bool,
    /// List-level disabled flag of the selected collection.
    pub selected_disabled: bool,
    /// Marked indices on the available collection.
    pub available_selection: Vec<usize>,
    /// Marked indices on the selected collection.
    pub selected_selection: Vec<usize>,
    /// Serialized mirror at snapshot time.
    pub submitted_value: String,
}

/// Move the marked entries of `from` into `to`, adjusting for index shift
/// as entries come out. Insertion is at canonical rank when `sort` is set
/// (first position whose rank strictly exceeds the moved entry's), else an
/// append. Moved entries are marked selected at the destination.
fn transfer(
    from: &mut Collection,
    from_selection: &mut SelectionSet,
    to: &mut Collection,
    to_selection: &mut SelectionSet,
    sort: bool,
    canonical: Option<&CanonicalOrder>,
) -> usize {
    let marks = from_selection.indices();
    let mut moved = 0;
    for mark in marks {
        let entry = from.remove_at(mark - moved);
        let at = insertion_point(to, &entry, sort, canonical);
        to_selection.shift_for_insert(at);
        to.insert_at(at, entry);
        to_selection.insert(at);
        moved += 1;
    }
    from_selection.clear();
    moved
}

/// Duplicate-selections add: clone the marked entries into `to`, leaving
/// `from` untouched (its marks are still consumed by the gesture).
fn clone_marked(
    from: &Collection,
    from_selection: &mut SelectionSet,
    to: &mut Collection,
    to_selection: &mut SelectionSet,
    sort: bool,
    canonical: Option<&CanonicalOrder>,
) -> usize {
    let marks = from_selection.indices();
    let mut moved = 0;
    for mark in marks {
        let Some(entry) = from.get(mark).cloned() else {
            continue;
        };
        let at = insertion_point(to, &entry, sort, canonical);
        to_selection.shift_for_insert(at);
        to.insert_at(at, entry);
        to_selection.insert(at);
        moved += 1;
    }
    from_selection.clear();
    moved
}

/// Duplicate-selections remove: marked entries are simply discarded.
fn discard_marked(collection: &mut Collection, selection: &mut SelectionSet) -> usize {
    let marks = selection.indices();
    let mut removed = 0;
    for mark in marks {
        collection.remove_at(mark - removed);
        removed += 1;
    }
    selection.clear();
    removed
}

fn insertion_point(
    to: &Collection,
    entry: &Entry,
    sort: bool,
    canonical: Option<&CanonicalOrder>,
) -> usize {
    if sort && let Some(order) = canonical {
        let rank = order.rank(entry.value());
        for (position, existing) in to.entries().iter().enumerate() {
            if rank < order.rank(existing.value()) {
                return position;
            }
        }
    }
    to.len()
}

fn mark_enabled(collection: &Collection, selection: &mut SelectionSet) {
    selection.clear();
    for (index, entry) in collection.entries().iter().enumerate() {
        if !entry.is_disabled() {
            selection.insert(index);
        }
    }
}

fn marked_enabled_count(collection: &Collection, selection: &SelectionSet) -> usize {
    selection
        .iter()
        .filter(|&mark| {
            collection
                .get(mark)
                .is_some_and(|entry| !entry.is_disabled())
        })
        .count()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_entries() -> impl Strategy<Value = Vec<Entry>> {
        prop::collection::vec(("[a-d]{1,3}", "[A-D]{1,3}"), 0..6).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(label, value)| Entry::new(label, value))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn add_conserves_entries(
            available in arb_entries(),
            selected in arb_entries(),
            marks in prop::collection::btree_set(0usize..8, 0..4),
        ) {
            let engine = DualList::new(ListCodec::default());
            let mut state = engine.state(
                Collection::from_entries(available.clone()),
                Collection::from_entries(selected.clone()),
            );
            for mark in marks {
                state.available_selection.insert(mark);
            }
            let total = available.len() + selected.len();
            let _ = engine.add(&mut state);
            prop_assert_eq!(state.available.len() + state.selected.len(), total);
        }

        #[test]
        fn mirror_always_matches_selected_values(
            available in arb_entries(),
            marks in prop::collection::btree_set(0usize..8, 0..4),
        ) {
            let codec = ListCodec::default();
            let engine = DualList::new(codec);
            let mut state = engine.state(Collection::from_entries(available), Collection::new());
            for mark in marks {
                state.available_selection.insert(mark);
            }
            let _ = engine.add(&mut state);
            let expected = codec.join(&state.selected.values().collect::<Vec<_>>());
            prop_assert_eq!(state.submitted_value(), expected.as_str());
        }
    }
}
