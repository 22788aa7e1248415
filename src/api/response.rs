//! Decoding of recipe API responses.

use crate::domain::{ApiError, Recipe, ResultPage};
use serde::Deserialize;

/// Longest body excerpt carried in [`ApiError::Status`].
const BODY_EXCERPT_CHARS: usize = 200;

/// Wire shape of `GET /api/recipes`.
#[derive(Debug, Deserialize)]
struct RecipesResponse {
    recipes: Vec<Recipe>,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    total_recipes: u64,
}

/// Turns an HTTP status and body into a [`ResultPage`].
///
/// # Errors
///
/// - [`ApiError::Status`] for any status outside `200..300`
/// - [`ApiError::Decode`] if the body is not JSON or lacks a `recipes` array
pub fn parse_response(status: u16, body: &[u8]) -> Result<ResultPage, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status {
            status,
            body: body_excerpt(body),
        });
    }

    let response: RecipesResponse =
        serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))?;

    Ok(ResultPage {
        items: response.recipes,
        total_pages: response.total_pages,
        total_count: response.total_recipes,
    })
}

fn body_excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.chars().count() <= BODY_EXCERPT_CHARS {
        return text.to_string();
    }
    let mut excerpt: String = text.chars().take(BODY_EXCERPT_CHARS).collect();
    excerpt.push('…');
    excerpt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_full_page() {
        let body = br#"{
            "recipes": [
                {"id": 1, "title": "Margherita Pizza", "cuisine": "Italian", "rating": 4.7},
                {"id": 2, "title": "Pad Thai", "cuisine": "Thai", "total_time": 35}
            ],
            "total_pages": 4,
            "total_recipes": 52
        }"#;

        let page = parse_response(200, body).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].title, "Pad Thai");
        assert_eq!(page.items[1].total_time, Some(35.0));
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.total_count, 52);
    }

    #[test]
    fn test_missing_totals_default_to_zero() {
        let page = parse_response(200, br#"{"recipes": []}"#).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_count, 0);
    }

    #[test]
    fn test_missing_recipes_is_decode_error() {
        let err = parse_response(200, br#"{"total_pages": 1}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let err = parse_response(200, b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_non_success_status_keeps_excerpt() {
        let body = "x".repeat(500);
        match parse_response(503, body.as_bytes()).unwrap_err() {
            ApiError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body.chars().count(), BODY_EXCERPT_CHARS + 1);
                assert!(body.ends_with('…'));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_checked_before_body() {
        let err = parse_response(404, br#"{"recipes": []}"#).unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 404,
                body: r#"{"recipes": []}"#.to_string()
            }
        );
    }
}
