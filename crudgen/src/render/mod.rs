//! Literal token substitution over stub text
//!
//! [`render`] replaces every occurrence of every key of a [`TokenMap`] in one
//! left-to-right pass. Replacement text is emitted as-is and never rescanned,
//! so the result does not depend on the order keys were inserted in. When two
//! keys match at the same position the longest one wins.
//!
//! Placeholders without an entry are left in the output verbatim. That is the
//! behavior generated stubs rely on for Blade echoes such as
//! `{{ $product->name }}`, and also the way a missing token leaks into a
//! generated file; [`unresolved_placeholders`] finds such leftovers.
//!
//! # Known hazard
//!
//! A value that contains another key's literal text (for example a title of
//! `"{{modelName}}"`) renders differently here than under sequential
//! replacement. [`TokenMap::nested_keys`] reports such pairs.

pub mod tokens;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

pub use tokens::{
    CommonTokens, ControllerTokens, FieldTokens, ModelTokens, Token, TokenSet, ViewTokens,
};

/// `{{identifier}}` with no whitespace inside the braces
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{[A-Za-z_][A-Za-z0-9_]*\}\}").expect("valid placeholder regex"));

/// Placeholder key → replacement text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMap {
    entries: BTreeMap<String, String>,
}

impl TokenMap {
    /// Empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of a known token
    pub fn insert(&mut self, token: Token, value: impl Into<String>) {
        self.entries.insert(token.key().to_string(), value.into());
    }

    /// Set the value of an arbitrary key
    pub fn insert_key(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Value for a known token
    #[must_use]
    pub fn get(&self, token: Token) -> Option<&str> {
        self.get_key(token.key())
    }

    /// Value for an arbitrary key
    #[must_use]
    pub fn get_key(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Pairs `(key, other_key)` where the value of `key` contains `other_key`
    #[must_use]
    pub fn nested_keys(&self) -> Vec<(String, String)> {
        let mut nested = Vec::new();
        for (key, value) in &self.entries {
            for other in self.entries.keys() {
                if value.contains(other.as_str()) {
                    nested.push((key.clone(), other.clone()));
                }
            }
        }
        nested
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TokenMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Substitute every key of `tokens` in `template`
///
/// ```
/// use crudgen::render::{render, Token, TokenMap};
///
/// let mut tokens = TokenMap::new();
/// tokens.insert(Token::ModelName, "Product");
/// assert_eq!(render("class {{modelName}} {{other}}", &tokens), "class Product {{other}}");
/// ```
#[must_use]
pub fn render(template: &str, tokens: &TokenMap) -> String {
    // Longest keys first so that a key that is a prefix of another never wins
    let mut keys: Vec<(&str, &str)> = tokens.iter().filter(|(k, _)| !k.is_empty()).collect();
    keys.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(ch) = rest.chars().next() {
        if let Some((key, value)) = keys.iter().find(|(key, _)| rest.starts_with(key)) {
            output.push_str(value);
            rest = &rest[key.len()..];
        } else {
            output.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    output
}

/// Render a typed token record
#[must_use]
pub fn render_with(template: &str, tokens: &impl TokenSet) -> String {
    render(template, &tokens.to_token_map())
}

/// `{{identifier}}` placeholders left in rendered text, in order of appearance
#[must_use]
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    PLACEHOLDER
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> TokenMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let tokens = map(&[("{{modelName}}", "Product")]);
        assert_eq!(
            render("{{modelName}}::find(); new {{modelName}}", &tokens),
            "Product::find(); new Product"
        );
    }

    #[test]
    fn test_replacement_is_not_rescanned() {
        let tokens = map(&[("{{a}}", "{{b}}"), ("{{b}}", "B")]);
        assert_eq!(render("{{a}} {{b}}", &tokens), "{{b}} B");
    }

    #[test]
    fn test_longest_key_wins() {
        let tokens = map(&[("{{model}}", "short"), ("{{model}}s", "long")]);
        assert_eq!(render("{{model}}s {{model}}", &tokens), "long short");
    }

    #[test]
    fn test_unknown_placeholder_left_verbatim() {
        let tokens = map(&[("{{modelName}}", "Product")]);
        let out = render("{{modelName}} {{modelColour}}", &tokens);
        assert_eq!(out, "Product {{modelColour}}");
        assert_eq!(unresolved_placeholders(&out), vec!["{{modelColour}}"]);
    }

    #[test]
    fn test_blade_echo_is_not_a_placeholder() {
        let tokens = map(&[("{{modelNameLowerCase}}", "product"), ("{{column}}", "name")]);
        let out = render("<td>{{ ${{modelNameLowerCase}}->{{column}} }}</td>", &tokens);
        assert_eq!(out, "<td>{{ $product->name }}</td>");
        assert!(unresolved_placeholders(&out).is_empty());
    }

    #[test]
    fn test_multibyte_text_survives() {
        let tokens = map(&[("{{title}}", "Prix")]);
        assert_eq!(render("« {{title}} » — €", &tokens), "« Prix » — €");
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(render("", &map(&[("{{a}}", "x")])), "");
        assert_eq!(render("{{a}}", &TokenMap::new()), "{{a}}");
        assert_eq!(render("abc", &map(&[("", "x")])), "abc");
    }

    #[test]
    fn test_nested_keys_reported() {
        let tokens = map(&[("{{modelTitle}}", "A {{modelName}}"), ("{{modelName}}", "Product")]);
        assert_eq!(
            tokens.nested_keys(),
            vec![("{{modelTitle}}".to_string(), "{{modelName}}".to_string())]
        );
        assert!(map(&[("{{a}}", "x")]).nested_keys().is_empty());
    }
}
