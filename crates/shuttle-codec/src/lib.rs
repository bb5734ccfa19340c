#![forbid(unsafe_code)]

//! Reversible escaped multi-value encoding.
//!
//! A list-transfer widget submits an ordered sequence of arbitrary strings
//! through a single form field. This crate provides the wire format: each
//! value is escaped (escape chars doubled, delimiters prefixed with the
//! escape char) and the escaped values are joined with a single unescaped
//! delimiter. Decoding scans for delimiters preceded by an even run of
//! escape characters, so values may contain the delimiter, the escape
//! character, or runs of either.
//!
//! # Example
//! ```
//! use shuttle_codec::ListCodec;
//!
//! let codec = ListCodec::default(); // ',' delimited, '\' escaped
//! let wire = codec.join(&["a,b", "c"]);
//! assert_eq!(wire, "a\\,b,c");
//! assert_eq!(codec.split(&wire), vec!["a,b", "c"]);
//! ```

use thiserror::Error;

/// Codec configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The delimiter and escape character must be distinct, otherwise an
    /// escaped delimiter is indistinguishable from an escaped escape char
    /// followed by a separator.
    #[error("delimiter and escape character must differ (got {0:?} for both)")]
    DelimiterEscapeClash(char),
}

/// Escape a single value for inclusion in a delimited list.
///
/// Occurrences of the escape character are doubled, then occurrences of the
/// delimiter are prefixed with the escape character.
///
/// A missing delimiter degenerates to identity (there is nothing to protect
/// against); a missing escape character makes escaping unavailable and
/// yields `None`.
#[must_use]
pub fn escape(value: &str, delimiter: Option<char>, escape_char: Option<char>) -> Option<String> {
    let Some(delimiter) = delimiter else {
        return Some(value.to_owned());
    };
    let escape_char = escape_char?;
    Some(escape_with(value, delimiter, escape_char))
}

/// Exact left inverse of [`escape`] for a single value: un-doubles the
/// escape character, then strips escape prefixes from delimiters.
///
/// Same degenerate cases as [`escape`].
#[must_use]
pub fn unescape(value: &str, delimiter: Option<char>, escape_char: Option<char>) -> Option<String> {
    let Some(delimiter) = delimiter else {
        return Some(value.to_owned());
    };
    let escape_char = escape_char?;
    Some(unescape_with(value, delimiter, escape_char))
}

fn escape_with(value: &str, delimiter: char, escape_char: char) -> String {
    let doubled = value.replace(
        escape_char,
        &format!("{escape_char}{escape_char}"),
    );
    doubled.replace(delimiter, &format!("{escape_char}{delimiter}"))
}

fn unescape_with(value: &str, delimiter: char, escape_char: char) -> String {
    // Two sequential left-to-right passes, mirroring the encoder: first
    // collapse doubled escape chars, then strip escaped delimiters.
    let collapsed = value.replace(
        &format!("{escape_char}{escape_char}"),
        &escape_char.to_string(),
    );
    collapsed.replace(
        &format!("{escape_char}{delimiter}"),
        &delimiter.to_string(),
    )
}

/// A validated delimiter/escape pair for encoding and decoding value lists.
///
/// Both characters come from the widget's server-rendered configuration,
/// supplied once at initialization. The pair must be distinct; see
/// [`CodecError::DelimiterEscapeClash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCodec {
    delimiter: char,
    escape: char,
}

impl Default for ListCodec {
    /// The historical wire defaults: comma-delimited, backslash-escaped.
    fn default() -> Self {
        Self {
            delimiter: ',',
            escape: '\\',
        }
    }
}

impl ListCodec {
    /// Create a codec from a delimiter and an escape character.
    pub fn new(delimiter: char, escape: char) -> Result<Self, CodecError> {
        if delimiter == escape {
            return Err(CodecError::DelimiterEscapeClash(delimiter));
        }
        Ok(Self { delimiter, escape })
    }

    /// The configured delimiter character.
    #[must_use]
    pub const fn delimiter(&self) -> char {
        self.delimiter
    }

    /// The configured escape character.
    #[must_use]
    pub const fn escape_char(&self) -> char {
        self.escape
    }

    /// Escape a single value.
    #[must_use]
    pub fn escape(&self, value: &str) -> String {
        escape_with(value, self.delimiter, self.escape)
    }

    /// Unescape a single value.
    #[must_use]
    pub fn unescape(&self, value: &str) -> String {
        unescape_with(value, self.delimiter, self.escape)
    }

    /// Serialize an ordered value sequence into one delimited string.
    ///
    /// Each value is escaped and values are joined with single unescaped
    /// delimiters, in input order.
    #[must_use]
    pub fn join<S: AsRef<str>>(&self, values: &[S]) -> String {
        let mut out = String::new();
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                out.push(self.delimiter);
            }
            out.push_str(&self.escape(value.as_ref()));
        }
        out
    }

    /// Decompose a serialized string back into the ordered value sequence.
    ///
    /// Scans character by character tracking the run length of consecutive
    /// escape characters; a delimiter separates values only when preceded by
    /// an even run (zero included) of escape characters. Each segment is
    /// then unescaped.
    ///
    /// An empty input yields an empty sequence.
    #[must_use]
    pub fn split(&self, serialized: &str) -> Vec<String> {
        if serialized.is_empty() {
            return Vec::new();
        }

        let mut segments = Vec::new();
        let mut segment_start = 0;
        let mut escape_run = 0usize;
        for (pos, ch) in serialized.char_indices() {
            if ch == self.delimiter && escape_run % 2 == 0 {
                segments.push(&serialized[segment_start..pos]);
                segment_start = pos + ch.len_utf8();
            }
            if ch == self.escape {
                escape_run += 1;
            } else {
                escape_run = 0;
            }
        }
        // The tail after the last real separator, possibly empty and
        // possibly ending in an odd escape run.
        segments.push(&serialized[segment_start..]);

        segments
            .into_iter()
            .map(|segment| self.unescape(segment))
            .collect()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn round_trip_default_codec(values in prop::collection::vec("[a-z,\\\\]{0,8}", 1..8)) {
            // The wire cannot distinguish an empty sequence from a lone
            // empty value; both serialize to "".
            prop_assume!(values.len() > 1 || !values[0].is_empty());
            let codec = ListCodec::default();
            prop_assert_eq!(codec.split(&codec.join(&values)), values);
        }

        #[test]
        fn round_trip_custom_codec(values in prop::collection::vec("[;^x ]{0,6}", 1..6)) {
            prop_assume!(values.len() > 1 || !values[0].is_empty());
            let codec = ListCodec::new(';', '^').unwrap();
            prop_assert_eq!(codec.split(&codec.join(&values)), values);
        }

        #[test]
        fn unescape_inverts_escape_single(value in "[a-z,\\\\]{0,16}") {
            let codec = ListCodec::default();
            prop_assert_eq!(codec.unescape(&codec.escape(&value)), value);
        }
    }
}
