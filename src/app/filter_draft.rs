//! Editable copy of the filter set shown in the filter panel.
//!
//! Typing never touches the query controller. The draft is turned into a
//! [`FilterSet`] only on submit, which is what keeps one fetch per submit
//! instead of one per keystroke.

use crate::domain::FilterSet;

/// Per-field text buffers plus the focused field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterDraft {
    fields: Vec<String>,
    values: Vec<String>,
    focused: usize,
}

impl FilterDraft {
    /// Creates a draft for `fields`, seeded from the currently applied filters.
    #[must_use]
    pub fn new(fields: &[String], applied: &FilterSet) -> Self {
        Self {
            fields: fields.to_vec(),
            values: fields
                .iter()
                .map(|field| applied.get(field).unwrap_or_default().to_string())
                .collect(),
            focused: 0,
        }
    }

    #[must_use]
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .zip(&self.values)
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    #[must_use]
    pub const fn focused(&self) -> usize {
        self.focused
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focused = if self.focused == 0 {
            self.fields.len() - 1
        } else {
            self.focused - 1
        };
    }

    pub fn push(&mut self, c: char) {
        if let Some(value) = self.values.get_mut(self.focused) {
            value.push(c);
        }
    }

    pub fn pop(&mut self) {
        if let Some(value) = self.values.get_mut(self.focused) {
            value.pop();
        }
    }

    /// Builds the filter set to submit. Blank fields are left out entirely.
    #[must_use]
    pub fn to_filter_set(&self) -> FilterSet {
        self.fields
            .iter()
            .zip(&self.values)
            .filter_map(|(field, value)| {
                let value = value.trim();
                (!value.is_empty()).then(|| (field.clone(), value.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<String> {
        vec!["title".to_string(), "cuisine".to_string(), "rating".to_string()]
    }

    #[test]
    fn test_seeded_from_applied_filters() {
        let applied = FilterSet::new().with("cuisine", "thai");
        let draft = FilterDraft::new(&fields(), &applied);
        let values: Vec<_> = draft.fields().collect();
        assert_eq!(values, vec![("title", ""), ("cuisine", "thai"), ("rating", "")]);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut draft = FilterDraft::new(&fields(), &FilterSet::new());
        draft.focus_next();
        for c in "korean".chars() {
            draft.push(c);
        }
        draft.pop();
        assert_eq!(draft.to_filter_set(), FilterSet::new().with("cuisine", "korea"));
    }

    #[test]
    fn test_focus_wraps() {
        let mut draft = FilterDraft::new(&fields(), &FilterSet::new());
        draft.focus_prev();
        assert_eq!(draft.focused(), 2);
        draft.focus_next();
        assert_eq!(draft.focused(), 0);
    }

    #[test]
    fn test_blank_fields_are_dropped() {
        let mut draft = FilterDraft::new(&fields(), &FilterSet::new());
        draft.push(' ');
        assert!(draft.to_filter_set().is_empty());

        let mut draft = FilterDraft::new(&fields(), &FilterSet::new().with("title", " soup "));
        assert_eq!(draft.to_filter_set().get("title"), Some("soup"));
    }
}
