//! Client for the remote recipe catalog API.
//!
//! The plugin cannot open sockets itself, so [`RecipeApiClient`] does not
//! perform I/O. It turns a [`FetchTicket`] into a [`WebRequest`] the plugin
//! shim hands to Zellij, and [`parse_response`] turns what Zellij returns into
//! a [`ResultPage`](crate::domain::ResultPage) or an [`ApiError`](crate::domain::ApiError).

pub mod request;
pub mod response;

pub use request::{ResponseContext, TraceContext, WebRequest, GENERATION_KEY};
pub use response::parse_response;

use crate::domain::ApiError;
use crate::query::FetchTicket;
use std::collections::BTreeMap;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_RECIPES_PATH: &str = "/api/recipes";

/// Builds requests against one recipe API endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeApiClient {
    base_url: String,
    recipes_path: String,
}

impl Default for RecipeApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, DEFAULT_RECIPES_PATH)
    }
}

impl RecipeApiClient {
    /// Creates a client. A trailing `/` on the base URL is dropped and a
    /// missing leading `/` on the path is added.
    #[must_use]
    pub fn new(base_url: impl Into<String>, recipes_path: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let recipes_path = recipes_path.into();
        let recipes_path = if recipes_path.starts_with('/') {
            recipes_path
        } else {
            format!("/{recipes_path}")
        };

        Self {
            base_url,
            recipes_path,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, self.recipes_path)
    }

    /// Builds the GET request for a ticket.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the query string cannot be encoded.
    pub fn build_request(&self, ticket: &FetchTicket) -> Result<WebRequest, ApiError> {
        let _span = tracing::debug_span!(
            "build_recipe_request",
            generation = ticket.generation,
            page = ticket.query.page.page,
            limit = ticket.query.page.limit
        )
        .entered();

        let query = request::encode_query(ticket)?;
        let url = format!("{}?{query}", self.endpoint());

        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        tracing::debug!(url = %url, "recipe request built");

        Ok(WebRequest {
            url,
            headers,
            context: request::request_context(ticket),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FilterSet, PageRequest};
    use crate::query::RecipeQuery;

    #[test]
    fn test_default_endpoint() {
        assert_eq!(
            RecipeApiClient::default().endpoint(),
            "http://localhost:8000/api/recipes"
        );
    }

    #[test]
    fn test_endpoint_normalizes_slashes() {
        let client = RecipeApiClient::new("https://recipes.example.com/", "v2/recipes");
        assert_eq!(client.endpoint(), "https://recipes.example.com/v2/recipes");
    }

    #[test]
    fn test_build_request() {
        let ticket = FetchTicket {
            generation: 12,
            query: RecipeQuery {
                filters: FilterSet::new().with("cuisine", "mexican"),
                page: PageRequest { page: 3, limit: 25 },
            },
        };

        let request = RecipeApiClient::default().build_request(&ticket).unwrap();
        assert_eq!(
            request.url,
            "http://localhost:8000/api/recipes?page=3&limit=25&cuisine=mexican"
        );
        assert_eq!(request.headers.get("Accept").map(String::as_str), Some("application/json"));
        assert_eq!(ResponseContext::parse(&request.context).map(|c| c.generation), Some(12));
    }
}
