//! Assertion helpers for generated output

use crate::render::{unresolved_placeholders, TokenMap};

/// Assert that rendered text has no `{{identifier}}` placeholder left
///
/// # Panics
///
/// Panics if a placeholder survived rendering
pub fn assert_fully_rendered(text: &str) {
    let leftovers = unresolved_placeholders(text);
    assert!(
        leftovers.is_empty(),
        "Expected no unresolved placeholders, found {leftovers:?}"
    );
}

/// Assert that no token value contains another token's key
///
/// # Panics
///
/// Panics if any value embeds a key
pub fn assert_no_nested_keys(tokens: &TokenMap) {
    let nested = tokens.nested_keys();
    assert!(
        nested.is_empty(),
        "Token values must not contain token keys, found {nested:?}"
    );
}

/// Assert that `needles` occur in `text` in the given order
///
/// # Panics
///
/// Panics if a needle is missing or out of order
pub fn assert_in_order(text: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        match text[from..].find(needle) {
            Some(offset) => from += offset + needle.len(),
            None => panic!("Expected {needle:?} after byte {from} in:\n{text}"),
        }
    }
}
