//! Style mappings and CSS property naming.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Style properties of a component, keyed by camel-case property name.
///
/// Keys are kept sorted so the same mapping always serializes to the same text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(BTreeMap<String, String>);

impl Style {
    /// Create an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a property value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Set a property, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Number of properties set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether any key of this style maps to the given CSS property.
    pub fn sets_css_property(&self, property: &str) -> bool {
        self.0.keys().any(|k| to_css_property(k) == property)
    }

    /// Apply edits on top of this style.
    ///
    /// Properties not mentioned in `edits` are preserved. An edit with an empty value
    /// removes the property.
    pub fn merged(&self, edits: &Style) -> Style {
        let mut merged = self.0.clone();
        for (key, value) in &edits.0 {
            if value.trim().is_empty() {
                merged.remove(key);
            } else {
                merged.insert(key.clone(), value.clone());
            }
        }
        Style(merged)
    }

    /// CSS declarations as `(property, value)` pairs, skipping empty values.
    pub fn declarations(&self) -> impl Iterator<Item = (String, &str)> {
        self.0
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| (to_css_property(k), v.as_str()))
    }

    /// Serialize as the body of an inline `style` attribute: `prop: value; prop: value`.
    pub fn to_inline(&self) -> String {
        self.declarations()
            .map(|(property, value)| format!("{}: {}", property, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl<K, V> FromIterator<(K, V)> for Style
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Style(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Convert a camel-case property name to its hyphenated CSS form.
///
/// `backgroundColor` becomes `background-color`. Names that are already hyphenated pass
/// through unchanged.
pub fn to_css_property(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Deserialize a style that may be given as `null`.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<Style, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Style>::deserialize(deserializer)?.unwrap_or_default())
}
