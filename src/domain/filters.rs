//! Filter set submitted by the filter panel.
//!
//! A [`FilterSet`] maps a filter-field name (`cuisine`, `ingredient`, ...) to
//! its string value. An empty value means the field is unset: it does not count
//! as an active filter and is never sent to the API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from filter-field name to value.
///
/// Backed by a `BTreeMap` so iteration (and therefore the generated query
/// string) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(BTreeMap<String, String>);

impl FilterSet {
    /// Creates an empty filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly useful in tests and examples.
    ///
    /// ```
    /// use recipe_browser::FilterSet;
    ///
    /// let filters = FilterSet::new().with("cuisine", "italian");
    /// assert!(filters.has_active());
    /// ```
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Sets a field, replacing any previous value. Empty values are kept as unset fields.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Returns the raw value of a field, including empty (unset) values.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// True if at least one field has a non-empty value.
    #[must_use]
    pub fn has_active(&self) -> bool {
        self.0.values().any(|value| !value.is_empty())
    }

    /// Iterates over fields with non-empty values, in field-name order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    /// Number of fields with non-empty values.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// True if no field is stored at all (set or unset).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_are_not_active() {
        let filters: FilterSet = [("cuisine", ""), ("title", "")].into_iter().collect();
        assert!(!filters.is_empty());
        assert!(!filters.has_active());
        assert_eq!(filters.active_count(), 0);
    }

    #[test]
    fn test_active_skips_unset_fields_in_name_order() {
        let filters = FilterSet::new()
            .with("title", "soup")
            .with("cuisine", "")
            .with("ingredient", "leek");

        let active: Vec<_> = filters.active().collect();
        assert_eq!(active, vec![("ingredient", "leek"), ("title", "soup")]);
        assert!(filters.has_active());
    }

    #[test]
    fn test_default_has_no_active_filters() {
        assert!(!FilterSet::default().has_active());
    }
}
