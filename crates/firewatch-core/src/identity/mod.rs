//! Identity matching and age classification.
//!
//! Handles:
//! - Name/address/city normalization (lowercase, collapsed whitespace, trimmed)
//! - Person identity comparison on (first name, last name)
//! - Age from birthdate and the child/adult split

mod age;

pub use age::*;

/// Normalize a name, address or city for comparison.
///
/// Lowercases, collapses internal runs of whitespace to a single space and
/// trims both ends. Every comparison site in the crate goes through this.
pub fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Compare two free-text values under [`normalize`].
pub fn same_text(a: &str, b: &str) -> bool {
    // Fast path avoids the allocations for the common exact hit.
    a == b || normalize(a) == normalize(b)
}

/// Two addresses refer to the same location.
pub fn same_address(a: &str, b: &str) -> bool {
    same_text(a, b)
}

/// Two (first name, last name) pairs identify the same person.
pub fn same_person(first_a: &str, last_a: &str, first_b: &str, last_b: &str) -> bool {
    same_text(first_a, first_b) && same_text(last_a, last_b)
}

/// A record keyed by a person's name.
pub trait PersonIdentity {
    fn first_name(&self) -> &str;
    fn last_name(&self) -> &str;

    /// Whether this record belongs to the given person.
    fn is_person(&self, first_name: &str, last_name: &str) -> bool {
        same_person(self.first_name(), self.last_name(), first_name, last_name)
    }

    /// Display form, used in log and error messages.
    fn full_name(&self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }
}
