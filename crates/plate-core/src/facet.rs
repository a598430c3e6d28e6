//! Per-position value sets and their letter/digit classification.

use std::fmt;

/// An atomic token usable at one code position: a letter, a digit, a space,
/// or a multi-character literal such as a region number.
pub type FacetValue = String;

/// Value class used to group adjacent facets before combining them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueClass {
    Letter,
    Digit,
    /// Spaces, punctuation and mixed literals. Neutral facets take the class
    /// of the group they end up in.
    Neutral,
}

/// Classify a single value.
///
/// Letters are tested with Unicode `is_alphabetic`, so Cyrillic and Latin
/// plates classify the same way. Digits are ASCII only because digit groups
/// are later parsed as numbers.
pub fn classify_value(value: &str) -> ValueClass {
    if value.is_empty() {
        ValueClass::Neutral
    } else if value.chars().all(char::is_alphabetic) {
        ValueClass::Letter
    } else if value.chars().all(|c| c.is_ascii_digit()) {
        ValueClass::Digit
    } else {
        ValueClass::Neutral
    }
}

/// The ordered alternatives allowed at one code position. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    values: Vec<FacetValue>,
}

impl Facet {
    /// Returns `None` for an empty value list.
    pub fn new(values: Vec<FacetValue>) -> Option<Self> {
        if values.is_empty() {
            None
        } else {
            Some(Self { values })
        }
    }

    /// Convenience constructor for literals in tests and benches.
    ///
    /// # Panics
    /// Panics if `values` is empty.
    pub fn from_strs(values: &[&str]) -> Self {
        Self::new(values.iter().map(|v| v.to_string()).collect())
            .expect("facet needs at least one value")
    }

    pub fn values(&self) -> &[FacetValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `Letter` or `Digit` when every value agrees, `Neutral` otherwise.
    pub fn class(&self) -> ValueClass {
        let mut classes = self.values.iter().map(|v| classify_value(v));
        let first = classes.next().unwrap_or(ValueClass::Neutral);
        if classes.all(|c| c == first) {
            first
        } else {
            ValueClass::Neutral
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.values.join(","))
    }
}
