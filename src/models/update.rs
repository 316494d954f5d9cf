//! Partial-update primitives shared by all entities.

use crate::{Error, Result};

/// Tri-state change for a single column in a partial update.
///
/// `Keep` leaves the stored value untouched, `Clear` writes `NULL`, and
/// `Set` writes the new value. Required columns reject `Clear`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    /// Leave the column unchanged.
    #[default]
    Keep,
    /// Set the column to `NULL`.
    Clear,
    /// Replace the column value.
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// Returns true if this field leaves the column unchanged.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Maps `None` to `Keep` and `Some(v)` to `Set(v)`.
    #[must_use]
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Keep, Self::Set)
    }

    /// Builds a field update from a command-line value and a `--clear-*` flag.
    ///
    /// The clear flag wins over a supplied value.
    #[must_use]
    pub fn from_parts(value: Option<T>, clear: bool) -> Self {
        if clear {
            Self::Clear
        } else {
            Self::from_option(value)
        }
    }

    /// Flattens into the column assignment: `None` for keep, `Some(None)`
    /// for clear, `Some(Some(v))` for set.
    #[must_use]
    pub fn into_assignment(self) -> Option<Option<T>> {
        match self {
            Self::Keep => None,
            Self::Clear => Some(None),
            Self::Set(v) => Some(Some(v)),
        }
    }
}

impl FieldUpdate<String> {
    /// Validates a required text column: `Clear` and blank `Set` are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] naming `field`.
    pub fn require_text(&self, field: &str) -> Result<()> {
        match self {
            Self::Keep => Ok(()),
            Self::Clear => Err(Error::InvalidInput(format!("{field} cannot be cleared"))),
            Self::Set(v) => require_non_empty(field, v).map(|_| ()),
        }
    }

    /// Trims a `Set` value; a value that is blank after trimming becomes `Clear`.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Set(v) => {
                let trimmed = v.trim();
                if trimmed.is_empty() {
                    Self::Clear
                } else {
                    Self::Set(trimmed.to_string())
                }
            },
            other => other,
        }
    }
}

/// Outcome of a partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The row existed and the supplied fields were written.
    Applied,
    /// No row has the given id.
    NotFound,
    /// No fields were supplied; storage was not touched.
    NoChanges,
}

/// Returns `value` trimmed, or an error if nothing is left.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] naming `field` when `value` is blank.
pub fn require_non_empty<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{field} is required")));
    }
    Ok(trimmed)
}

/// Trims an optional text value, mapping blank to `None`.
#[must_use]
pub fn blank_to_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
