//! Property tests for the template renderer

use crudgen::render::{render, unresolved_placeholders, TokenMap};
use proptest::prelude::*;

/// Keys from a small alphabet so templates actually hit them
fn key() -> impl Strategy<Value = String> {
    "[a-e]{1,3}".prop_map(|name| format!("{{{{{name}}}}}"))
}

/// Values that cannot contain a key
fn value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 _.$-]{0,12}"
}

fn pairs() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map(key(), value(), 0..6)
        .prop_map(|map| map.into_iter().collect::<Vec<_>>())
}

/// Template made of literal text and keys drawn from the same alphabet
fn template() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![key(), "[a-z <>/=\"']{0,6}"], 0..12)
        .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn test_insertion_order_does_not_matter(pairs in pairs(), template in template()) {
        let forward: TokenMap = pairs.iter().cloned().collect();
        let backward: TokenMap = pairs.iter().rev().cloned().collect();

        prop_assert_eq!(render(&template, &forward), render(&template, &backward));
    }

    #[test]
    fn test_matches_sequential_replacement(pairs in pairs(), template in template()) {
        let tokens: TokenMap = pairs.iter().cloned().collect();
        prop_assume!(tokens.nested_keys().is_empty());

        let mut sequential = template.clone();
        for (key, value) in &pairs {
            sequential = sequential.replace(key.as_str(), value);
        }

        prop_assert_eq!(render(&template, &tokens), sequential);
    }

    #[test]
    fn test_known_keys_leave_no_placeholders(pairs in pairs(), template in template()) {
        let mut tokens: TokenMap = pairs.iter().cloned().collect();
        for placeholder in unresolved_placeholders(&template) {
            tokens.insert_key(placeholder, "x");
        }

        prop_assert!(unresolved_placeholders(&render(&template, &tokens)).is_empty());
    }

    #[test]
    fn test_unknown_placeholders_stay_verbatim(template in template()) {
        prop_assert_eq!(render(&template, &TokenMap::new()), template);
    }
}
