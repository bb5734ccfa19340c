#![forbid(unsafe_code)]

//! A single selectable item.

/// One selectable item: a display label paired with a submitted value.
///
/// Entries are immutable from the engine's point of view. Identity is
/// positional (index within a collection), never by value — duplicate
/// values are legal, and the duplicate-selections transfer mode produces
/// them on purpose.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Entry {
    label: String,
    value: String,
    disabled: bool,
}

impl Entry {
    /// Create an enabled entry with the given label and value.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            disabled: false,
        }
    }

    /// Set whether this entry is disabled.
    ///
    /// Disabled entries are skipped by bulk transfers and never count
    /// toward the add-all / remove-all predicates, but they keep their
    /// position and remain valid insertion-scan targets.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// The display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The submitted value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the entry is disabled.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl From<(&str, &str)> for Entry {
    fn from((label, value): (&str, &str)) -> Self {
        Self::new(label, value)
    }
}

impl From<(String, String)> for Entry {
    fn from((label, value): (String, String)) -> Self {
        Self::new(label, value)
    }
}
