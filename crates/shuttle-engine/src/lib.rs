#![forbid(unsafe_code)]

//! Selection-transfer and reorder engine for list widgets.
//!
//! Two widgets share this machinery: the dual-list ("shuttle") selector,
//! which moves entries between an `available` and a `selected` collection,
//! and the orderable list, which rearranges entries within one collection.
//! The rendering layer reports a gesture together with the current
//! collections and selections; the engine computes the new collections, the
//! new selection, the set of controls that should be enabled, and the
//! serialized value destined for the hidden transport field.
//!
//! Operations never fail. A call with nothing to do (empty selection,
//! boundary-blocked run, disabled source) returns [`Outcome::Unchanged`]
//! and leaves the state untouched.

use bitflags::bitflags;

pub mod collection;
pub mod dual;
pub mod entry;
pub mod order;
pub mod orderable;

mod shift;

pub use collection::{Collection, SelectionSet};
pub use dual::{DualList, DualListPersistState, DualListState};
pub use entry::Entry;
pub use order::{CanonicalOrder, MissingRank};
pub use orderable::{OrderableList, OrderablePersistState, OrderableListState};
pub use shuttle_codec::{CodecError, ListCodec};

/// Result of a mutating engine operation.
///
/// The engine's failure policy is "absence of precondition is absence of
/// effect": instead of erroring, an operation that cannot apply reports
/// [`Outcome::Unchanged`] and performs no mutation at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "check whether the operation changed the state"]
pub enum Outcome {
    /// The state was mutated and the serialized mirror was refreshed.
    Changed,
    /// Preconditions were not met; the collections and the mirror are
    /// untouched (stale selection marks may have been normalized away).
    Unchanged,
}

impl Outcome {
    /// Whether the operation mutated the state.
    #[inline]
    pub const fn changed(self) -> bool {
        matches!(self, Self::Changed)
    }

    pub(crate) const fn from_changed(changed: bool) -> Self {
        if changed { Self::Changed } else { Self::Unchanged }
    }
}

bitflags! {
    /// Controls that should currently be enabled, as pure predicates over
    /// the engine state.
    ///
    /// The rendering layer intersects this set with the controls the widget
    /// was configured with; a flag for a control that does not exist is
    /// simply ignored.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Controls: u8 {
        /// Transfer the selected available entries.
        const ADD = 1 << 0;
        /// Transfer every enabled available entry.
        const ADD_ALL = 1 << 1;
        /// Transfer the selected entries back out.
        const REMOVE = 1 << 2;
        /// Transfer every enabled selected entry back out.
        const REMOVE_ALL = 1 << 3;
        /// Shift the selected run one slot toward the front.
        const MOVE_UP = 1 << 4;
        /// Shift the selected run one slot toward the back.
        const MOVE_DOWN = 1 << 5;
        /// Relocate the selected entries to the front.
        const MOVE_TOP = 1 << 6;
        /// Relocate the selected entries to the back.
        const MOVE_BOTTOM = 1 << 7;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_changed_flag() {
        assert!(Outcome::Changed.changed());
        assert!(!Outcome::Unchanged.changed());
        assert_eq!(Outcome::from_changed(true), Outcome::Changed);
        assert_eq!(Outcome::from_changed(false), Outcome::Unchanged);
    }

    #[test]
    fn controls_compose() {
        let flags = Controls::ADD | Controls::ADD_ALL;
        assert!(flags.contains(Controls::ADD));
        assert!(!flags.contains(Controls::REMOVE));
    }
}
