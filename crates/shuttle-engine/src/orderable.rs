#![forbid(unsafe_code)]

//! Single-list reordering.
//!
//! One collection, four gestures: move the selected runs up or down by one
//! slot, or relocate the selected entries to the top or bottom while
//! preserving their relative order. The serialized mirror covers the whole
//! collection, since every entry of an orderable list is submitted.

use crate::collection::{Collection, SelectionSet};
use crate::entry::Entry;
use crate::shift;
use crate::{Controls, Outcome};
use shuttle_codec::ListCodec;

/// Per-widget configuration for the orderable list.
#[derive(Debug, Clone, Default)]
pub struct OrderableList {
    codec: ListCodec,
}

impl OrderableList {
    /// Create an orderable-list engine over the given wire codec.
    #[must_use]
    pub fn new(codec: ListCodec) -> Self {
        Self { codec }
    }

    /// Build a state from the initial items, with the serialized mirror
    /// already in sync.
    #[must_use]
    pub fn state(&self, items: Collection) -> OrderableListState {
        let mut state = OrderableListState {
            items,
            selection: SelectionSet::new(),
            submitted_value: String::new(),
        };
        self.sync_value(&mut state);
        state
    }

    /// Recompute the serialized mirror from the current item order.
    pub fn sync_value(&self, state: &mut OrderableListState) {
        let values: Vec<&str> = state.items.values().collect();
        state.submitted_value = self.codec.join(&values);
    }

    /// Shift each selected run one slot toward the front.
    pub fn move_up(&self, state: &mut OrderableListState) -> Outcome {
        let changed = shift::shift_up(&mut state.items, &mut state.selection);
        self.finish("move_up", changed, state)
    }

    /// Shift each selected run one slot toward the back.
    pub fn move_down(&self, state: &mut OrderableListState) -> Outcome {
        let changed = shift::shift_down(&mut state.items, &mut state.selection);
        self.finish("move_down", changed, state)
    }

    /// Relocate the selected entries to the front, stably.
    pub fn move_top(&self, state: &mut OrderableListState) -> Outcome {
        let changed = shift::shift_to_top(&mut state.items, &mut state.selection);
        self.finish("move_top", changed, state)
    }

    /// Relocate the selected entries to the back, stably.
    pub fn move_bottom(&self, state: &mut OrderableListState) -> Outcome {
        let changed = shift::shift_to_bottom(&mut state.items, &mut state.selection);
        self.finish("move_bottom", changed, state)
    }

    /// Pure control-enablement predicates over the current state.
    ///
    /// Top shares the up predicate and bottom shares the down predicate:
    /// a run that cannot move one slot cannot move further either.
    #[must_use]
    pub fn controls(&self, state: &OrderableListState) -> Controls {
        let mut flags = Controls::empty();
        if shift::can_shift_up(&state.items, &state.selection) {
            flags |= Controls::MOVE_UP | Controls::MOVE_TOP;
        }
        if shift::can_shift_down(&state.items, &state.selection) {
            flags |= Controls::MOVE_DOWN | Controls::MOVE_BOTTOM;
        }
        flags
    }

    fn finish(&self, op: &str, changed: bool, state: &mut OrderableListState) -> Outcome {
        if changed {
            self.sync_value(state);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                message = "orderable.move",
                op,
                items = state.items.len(),
                selected = state.selection.len(),
            );
        }
        #[cfg(not(feature = "tracing"))]
        let _ = op;
        Outcome::from_changed(changed)
    }
}

/// Mutable state for an [`OrderableList`]: the items, the selection, and
/// the serialized mirror of the item values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderableListState {
    /// The entries in display order.
    pub items: Collection,
    /// Marks on `items`.
    pub selection: SelectionSet,
    submitted_value: String,
}

impl OrderableListState {
    /// The serialized value destined for the hidden transport field.
    #[must_use]
    pub fn submitted_value(&self) -> &str {
        &self.submitted_value
    }

    /// Snapshot the state for persistence.
    #[must_use]
    pub fn save_state(&self) -> OrderablePersistState {
        OrderablePersistState {
            items: self.items.entries().to_vec(),
            disabled: self.items.is_disabled(),
            selection: self.selection.indices(),
            submitted_value: self.submitted_value.clone(),
        }
    }

    /// Restore a previously saved snapshot.
    pub fn restore_state(&mut self, snapshot: OrderablePersistState) {
        self.items = Collection::from_entries(snapshot.items).disabled(snapshot.disabled);
        self.selection = snapshot.selection.into_iter().collect();
        self.submitted_value = snapshot.submitted_value;
    }
}

/// Persistable snapshot of an [`OrderableListState`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct OrderablePersistState {
    /// Entries in display order.
    pub items: Vec<Entry>,
    /// List-level disabled flag.
    pub disabled: bool,
    /// Marked indices.
    pub selection: Vec<usize>,
    /// Serialized mirror at snapshot time.
    pub submitted_value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> OrderableList {
        OrderableList::new(ListCodec::default())
    }

    fn items(labels: &[&str]) -> Collection {
        Collection::from_entries(labels.iter().map(|&label| Entry::new(label, label)))
    }

    fn labels(state: &OrderableListState) -> Vec<&str> {
        state.items.entries().iter().map(Entry::label).collect()
    }

    #[test]
    fn move_up_blocked_at_top_is_unchanged() {
        let engine = engine();
        let mut state = engine.state(items(&["A", "B", "C"]));
        state.selection.insert(0);
        state.selection.insert(1);

        assert_eq!(engine.move_up(&mut state), Outcome::Unchanged);
        assert_eq!(labels(&state), vec!["A", "B", "C"]);
        assert_eq!(state.submitted_value(), "A,B,C");
    }

    #[test]
    fn move_top_preserves_relative_order() {
        let engine = engine();
        let mut state = engine.state(items(&["A", "B", "C", "D"]));
        state.selection.insert(1);
        state.selection.insert(3);

        assert_eq!(engine.move_top(&mut state), Outcome::Changed);
        assert_eq!(labels(&state), vec!["B", "D", "A", "C"]);
        assert_eq!(state.selection.indices(), vec![0, 1]);
        assert_eq!(state.submitted_value(), "B,D,A,C");
    }

    #[test]
    fn move_bottom_preserves_relative_order() {
        let engine = engine();
        let mut state = engine.state(items(&["A", "B", "C", "D"]));
        state.selection.insert(0);
        state.selection.insert(2);

        assert_eq!(engine.move_bottom(&mut state), Outcome::Changed);
        assert_eq!(labels(&state), vec!["B", "D", "A", "C"]);
        assert_eq!(state.selection.indices(), vec![2, 3]);
    }

    #[test]
    fn move_down_shifts_run_one_slot() {
        let engine = engine();
        let mut state = engine.state(items(&["A", "B", "C"]));
        state.selection.insert(0);
        state.selection.insert(1);

        assert_eq!(engine.move_down(&mut state), Outcome::Changed);
        assert_eq!(labels(&state), vec!["C", "A", "B"]);
        assert_eq!(state.submitted_value(), "C,A,B");
    }

    #[test]
    fn empty_selection_is_unchanged() {
        let engine = engine();
        let mut state = engine.state(items(&["A", "B"]));
        let before = state.clone();
        assert_eq!(engine.move_up(&mut state), Outcome::Unchanged);
        assert_eq!(engine.move_down(&mut state), Outcome::Unchanged);
        assert_eq!(engine.move_top(&mut state), Outcome::Unchanged);
        assert_eq!(engine.move_bottom(&mut state), Outcome::Unchanged);
        assert_eq!(state, before);
    }

    #[test]
    fn mirror_always_reflects_item_order() {
        let engine = engine();
        let mut state = engine.state(items(&["x,y", "z"]));
        assert_eq!(state.submitted_value(), "x\\,y,z");

        state.selection.insert(1);
        let _ = engine.move_top(&mut state);
        assert_eq!(state.submitted_value(), "z,x\\,y");
    }

    #[test]
    fn controls_share_predicates_between_step_and_edge_moves() {
        let engine = engine();
        let mut state = engine.state(items(&["A", "B", "C"]));

        assert!(engine.controls(&state).is_empty());

        state.selection.insert(0);
        let controls = engine.controls(&state);
        assert!(!controls.contains(Controls::MOVE_UP));
        assert!(!controls.contains(Controls::MOVE_TOP));
        assert!(controls.contains(Controls::MOVE_DOWN));
        assert!(controls.contains(Controls::MOVE_BOTTOM));

        state.selection.clear();
        state.selection.insert(2);
        let controls = engine.controls(&state);
        assert!(controls.contains(Controls::MOVE_UP));
        assert!(controls.contains(Controls::MOVE_TOP));
        assert!(!controls.contains(Controls::MOVE_DOWN));
        assert!(!controls.contains(Controls::MOVE_BOTTOM));
    }

    #[cfg(feature = "state-persistence")]
    #[test]
    fn persist_state_round_trips_as_json() {
        let engine = engine();
        let mut state = engine.state(items(&["A", "B"]));
        state.selection.insert(1);

        let json = serde_json::to_string(&state.save_state()).unwrap();
        let snapshot: OrderablePersistState = serde_json::from_str(&json).unwrap();

        let mut restored = OrderableListState::default();
        restored.restore_state(snapshot);
        assert_eq!(restored, state);
    }
}
