//! Recipe record as served by the remote catalog API.
//!
//! The browser treats a recipe as an opaque record. Only `id` and `title` are
//! required; a handful of well-known descriptive fields are read for display,
//! and anything else the API sends is kept untouched in [`Recipe::extra`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single recipe record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Identifier assigned by the API (number or string, kept as sent).
    pub id: Value,

    /// Human-readable recipe name.
    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,

    /// Average rating, usually on a 0-5 scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<f64>,

    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<f64>,

    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<f64>,

    /// Servings, sent either as a number or as text like `"4 servings"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serves: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Nutrient name to amount, e.g. `"calories" -> "389 kcal"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrients: Option<Map<String, Value>>,

    /// Every other field returned by the API.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Recipe {
    /// Creates a recipe with only an id and title set.
    #[must_use]
    pub fn new(id: impl Into<Value>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            cuisine: None,
            rating: None,
            prep_time: None,
            cook_time: None,
            total_time: None,
            serves: None,
            description: None,
            nutrients: None,
            extra: Map::new(),
        }
    }

    /// Returns the id as display text, without JSON string quotes.
    #[must_use]
    pub fn id_label(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Formats a duration in minutes as `1h 05m` or `45m`.
    #[must_use]
    pub fn format_minutes(minutes: f64) -> String {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let minutes = minutes.max(0.0).round() as u64;
        if minutes >= 60 {
            format!("{}h {:02}m", minutes / 60, minutes % 60)
        } else {
            format!("{minutes}m")
        }
    }

    /// Display text for a nutrient value, which the API sends as string or number.
    #[must_use]
    pub fn nutrient_label(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Null => "-".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_are_kept() {
        let json = r#"{
            "id": 7,
            "title": "Shakshuka",
            "cuisine": "Middle Eastern",
            "rating": 4.6,
            "total_time": 35,
            "url": "https://example.com/shakshuka",
            "continent": "Asia"
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.id_label(), "7");
        assert_eq!(recipe.title, "Shakshuka");
        assert_eq!(recipe.cuisine.as_deref(), Some("Middle Eastern"));
        assert_eq!(recipe.total_time, Some(35.0));
        assert_eq!(recipe.extra.get("continent"), Some(&Value::from("Asia")));
        assert!(recipe.extra.contains_key("url"));
        assert!(!recipe.extra.contains_key("title"));
    }

    #[test]
    fn test_string_ids_display_without_quotes() {
        let recipe = Recipe::new("r-12", "Dal");
        assert_eq!(recipe.id_label(), "r-12");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(Recipe::format_minutes(45.0), "45m");
        assert_eq!(Recipe::format_minutes(65.0), "1h 05m");
        assert_eq!(Recipe::format_minutes(119.6), "2h 00m");
    }
}
