#![forbid(unsafe_code)]

//! Canonical value ordering for sort-on-transfer.

/// Rank assigned to a value that is missing from the canonical table.
///
/// The historical widget appended a synthetic separator sentinel to its
/// server-rendered value table and fell back to "the index before the
/// separator" for unknown values, which lands on the last real value. The
/// intent behind that exact choice is not documented, so the fallback is
/// kept as a policy rather than hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingRank {
    /// Rank of the last known value (the historical behavior). Unknown
    /// values tie with the final table slot and insert after it.
    #[default]
    LastValue,
    /// One past every known value: unknown values sort strictly after all
    /// known ones, and known values insert ahead of unknown neighbors.
    End,
}

/// An externally supplied total order over entry values.
///
/// Computed once at widget initialization from the union of both
/// collections' original contents; the engine looks up an entry's rank by
/// value equality when inserting transferred entries in canonical position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalOrder {
    values: Vec<String>,
    missing: MissingRank,
}

impl CanonicalOrder {
    /// Build the order table from values in canonical sequence.
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            missing: MissingRank::default(),
        }
    }

    /// Set the fallback policy for values missing from the table.
    #[must_use]
    pub fn missing_rank(mut self, policy: MissingRank) -> Self {
        self.missing = policy;
        self
    }

    /// Number of known values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The rank of `value`: its position in the table, or the configured
    /// fallback when absent. Linear scan; the tables are UI-sized.
    #[must_use]
    pub fn rank(&self, value: &str) -> usize {
        self.values
            .iter()
            .position(|known| known == value)
            .unwrap_or(match self.missing {
                MissingRank::LastValue => self.values.len().saturating_sub(1),
                MissingRank::End => self.values.len(),
            })
    }
}
