#![forbid(unsafe_code)]

//! In-place run shifts shared by the dual-list and orderable widgets.
//!
//! All passes operate on one collection plus its selection, keep the marks
//! glued to the entries they move, and report whether anything changed.
//! A selected run blocked by the list boundary does not move.

use crate::collection::{Collection, SelectionSet};

/// Shift each contiguous selected run one slot toward the front.
///
/// Scans ascending from just below the first unselected slot, swapping
/// each selected entry with its unselected upper neighbor. The prefix run
/// touching index 0 stays put.
pub(crate) fn shift_up(collection: &mut Collection, selection: &mut SelectionSet) -> bool {
    selection.normalize(collection);
    let len = collection.len();
    if len < 2 {
        return false;
    }

    // First unselected slot; a fully selected list has no room to move.
    let mut index = 0;
    while selection.contains(index) {
        index += 1;
        if index == len {
            return false;
        }
    }
    index += 1;

    let mut changed = false;
    while index < len {
        if selection.contains(index) {
            collection.swap(index, index - 1);
            selection.remove(index);
            selection.insert(index - 1);
            changed = true;
        }
        index += 1;
    }
    changed
}

/// Shift each contiguous selected run one slot toward the back.
///
/// Scans descending from just above the last unselected slot so adjacent
/// selected entries do not overwrite one another mid-pass. The suffix run
/// touching the end stays put.
pub(crate) fn shift_down(collection: &mut Collection, selection: &mut SelectionSet) -> bool {
    selection.normalize(collection);
    let len = collection.len();
    if len < 2 {
        return false;
    }

    // Last unselected slot; bail out if the selection runs to the end of
    // the list with nothing above it.
    let mut index = len - 1;
    while selection.contains(index) {
        if index == 0 {
            return false;
        }
        index -= 1;
    }
    if index == 0 {
        return false;
    }
    index -= 1;

    let mut changed = false;
    loop {
        if selection.contains(index) {
            collection.swap(index, index + 1);
            selection.remove(index);
            selection.insert(index + 1);
            changed = true;
        }
        if index == 0 {
            break;
        }
        index -= 1;
    }
    changed
}

/// Relocate every selected entry to the first still-open unselected slot,
/// preserving the relative order among selected entries.
pub(crate) fn shift_to_top(collection: &mut Collection, selection: &mut SelectionSet) -> bool {
    selection.normalize(collection);
    let len = collection.len();
    if len < 2 {
        return false;
    }

    let mut open = 0;
    while open < len && selection.contains(open) {
        open += 1;
    }
    if open == len {
        return false;
    }

    let mut changed = false;
    for index in open + 1..len {
        if selection.contains(index) {
            let entry = collection.remove_at(index);
            collection.insert_at(open, entry);
            selection.remove(index);
            selection.insert(open);
            open += 1;
            changed = true;
        }
    }
    changed
}

/// Relocate every selected entry to the last still-open unselected slot,
/// preserving the relative order among selected entries.
pub(crate) fn shift_to_bottom(collection: &mut Collection, selection: &mut SelectionSet) -> bool {
    selection.normalize(collection);
    let len = collection.len();
    if len < 2 {
        return false;
    }

    let mut open = len - 1;
    while selection.contains(open) {
        if open == 0 {
            return false;
        }
        open -= 1;
    }
    if open == 0 {
        return false;
    }

    let mut changed = false;
    let mut index = open - 1;
    loop {
        if selection.contains(index) {
            let entry = collection.remove_at(index);
            collection.insert_at(open, entry);
            selection.remove(index);
            selection.insert(open);
            open -= 1;
            changed = true;
        }
        if index == 0 {
            break;
        }
        index -= 1;
    }
    changed
}

/// True when some selected entry has at least one unselected entry
/// strictly above it (equivalently: the selection is not a prefix block
/// touching index 0).
pub(crate) fn can_shift_up(collection: &Collection, selection: &SelectionSet) -> bool {
    let len = collection.len();
    let Some(first_unselected) = (0..len).find(|&index| !selection.contains(index)) else {
        return false;
    };
    selection
        .iter()
        .any(|mark| mark < len && mark > first_unselected)
}

/// True when some selected entry has at least one unselected entry
/// strictly below it.
pub(crate) fn can_shift_down(collection: &Collection, selection: &SelectionSet) -> bool {
    let len = collection.len();
    let Some(last_unselected) = (0..len).rev().find(|&index| !selection.contains(index)) else {
        return false;
    };
    selection.iter().any(|mark| mark < last_unselected)
}
