//! Recipe Browser: a Zellij plugin for browsing a remote recipe catalog.
//!
//! The plugin shows one page of recipes at a time from an HTTP recipe API,
//! with a filter panel, pagination, page-size switching and a detail drawer.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← web_request, timers, keys
//! └─────────────────────────────────────────────────────┘
//!                        │ Event / Action
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling, key modes, filter draft          │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Query (query/)│   │ API (api/)    │   │ UI (ui/)      │
//! │ - Controller  │   │ - Request URL │   │ - Components  │
//! │ - Generations │   │ - Decoding    │   │ - Theming     │
//! │ - Load floor  │   │ - Trace ctx   │   │ - Pagination  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) & Infrastructure (infrastructure/)│
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Fetch sequencing
//!
//! Every change to the filters, page or page size starts a new fetch under a
//! fresh generation number. The generation travels through the host's
//! `web_request` context and comes back with the response; a response whose
//! generation is no longer current is dropped. A response that arrives
//! sooner than the minimum loading time is held back and released by a timer,
//! so the loading state never flickers.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/recipe-browser.wasm" {
//!         api_base_url "http://localhost:8000"
//!         recipes_path "/api/recipes"
//!         page_size "15"
//!         page_sizes "10,15,25,50"
//!         min_loading_ms "300"
//!         filter_fields "title,cuisine,ingredient,rating,total_time"
//!         theme "saffron-dark"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use recipe_browser::{handle_event, initialize, Action, Config, Event};
//! use std::time::Instant;
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Start, Instant::now())?;
//!
//! for action in actions {
//!     if let Action::Fetch(ticket) = action {
//!         let request = state.api.build_request(&ticket)?;
//!         assert!(request.url.starts_with("http://localhost:8000/api/recipes?page=1&limit=15"));
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod query;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{
    ApiError, FilterSet, PageRequest, Recipe, RecipeBrowserError, Result, ResultPage,
};
pub use ui::Theme;

use api::{RecipeApiClient, DEFAULT_API_BASE_URL, DEFAULT_RECIPES_PATH};
use app::state::{DEFAULT_FILTER_FIELDS, DEFAULT_PAGE_SIZES};
use domain::DEFAULT_PAGE_SIZE;
use query::{QueryController, DEFAULT_MIN_LOADING};
use std::collections::BTreeMap;
use std::time::Duration;

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Scheme, host and port of the recipe API. Default: `http://localhost:8000`
    pub api_base_url: String,

    /// Path of the recipe listing endpoint. Default: `/api/recipes`
    pub recipes_path: String,

    /// Initial page size. Default: 15
    pub page_size: u32,

    /// Page sizes `+`/`-` step through, ascending. Default: `10,15,25,50`
    pub page_sizes: Vec<u32>,

    /// Minimum time the loading state stays visible. `0` disables the floor.
    pub min_loading: Duration,

    /// Fields offered in the filter panel, in display order.
    pub filter_fields: Vec<String>,

    /// Built-in theme name: `saffron-dark`, `cream-light` or `brick-night`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` refers to the host home directory.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            recipes_path: DEFAULT_RECIPES_PATH.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            min_loading: DEFAULT_MIN_LOADING,
            filter_fields: DEFAULT_FILTER_FIELDS.iter().map(ToString::to_string).collect(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Each key falls back to its default when missing or unparsable:
    ///
    /// - `api_base_url`, `recipes_path`: non-empty strings
    /// - `page_size`: positive integer
    /// - `page_sizes`: comma-separated positive integers (sorted, deduplicated)
    /// - `min_loading_ms`: milliseconds, `0` allowed
    /// - `filter_fields`: comma-separated names
    /// - `theme`, `theme_file`, `trace_level`: taken as-is
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use recipe_browser::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "25".to_string());
    /// map.insert("filter_fields".to_string(), "cuisine, ingredient".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.page_size, 25);
    /// assert_eq!(config.filter_fields, vec!["cuisine", "ingredient"]);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        let page_size = config
            .get("page_size")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.page_size);

        let page_sizes = config
            .get("page_sizes")
            .and_then(|s| {
                let mut sizes = s
                    .split(',')
                    .map(|n| n.trim().parse::<u32>().ok().filter(|&n| n > 0))
                    .collect::<Option<Vec<_>>>()?;
                sizes.sort_unstable();
                sizes.dedup();
                Some(sizes)
            })
            .filter(|sizes| !sizes.is_empty())
            .unwrap_or(defaults.page_sizes);

        let min_loading = config
            .get("min_loading_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map_or(defaults.min_loading, Duration::from_millis);

        let filter_fields = config
            .get("filter_fields")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|fields| !fields.is_empty())
            .unwrap_or(defaults.filter_fields);

        Self {
            api_base_url: non_empty("api_base_url").unwrap_or(defaults.api_base_url),
            recipes_path: non_empty("recipes_path").unwrap_or(defaults.recipes_path),
            page_size,
            page_sizes,
            min_loading,
            filter_fields,
            theme_name: non_empty("theme"),
            theme_file: non_empty("theme_file"),
            trace_level: non_empty("trace_level"),
        }
    }

    /// Checks values that parsing alone cannot guarantee, e.g. for a
    /// `Config` built by hand.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeBrowserError::Config`] describing the first unusable value.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(RecipeBrowserError::Config(
                "page_size must be positive".to_string(),
            ));
        }
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(RecipeBrowserError::Config(format!(
                "api_base_url must start with http:// or https://, got {:?}",
                self.api_base_url
            )));
        }
        if self.filter_fields.is_empty() {
            return Err(RecipeBrowserError::Config(
                "filter_fields must name at least one field".to_string(),
            ));
        }
        Ok(())
    }

    /// Configured page sizes with the initial page size merged in.
    fn effective_page_sizes(&self) -> Vec<u32> {
        let mut sizes: Vec<u32> = self.page_sizes.iter().copied().filter(|&n| n > 0).collect();
        sizes.push(self.page_size);
        sizes.retain(|&n| n > 0);
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }
}

/// Builds the application state for `config`.
///
/// A configuration that fails [`Config::validate`] is replaced by the
/// defaults, keeping only its theme and trace settings. The theme comes from
/// `theme_file`, then `theme`, then the default; a theme that fails to load
/// falls back to the default. No fetch is issued until the shim sends
/// [`Event::Start`].
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing recipe browser");

    let fallback;
    let config = match config.validate() {
        Ok(()) => config,
        Err(e) => {
            tracing::warn!(error = %e, "invalid configuration, using defaults");
            fallback = Config {
                theme_name: config.theme_name.clone(),
                theme_file: config.theme_file.clone(),
                trace_level: config.trace_level.clone(),
                ..Config::default()
            };
            &fallback
        }
    };

    let controller = QueryController::new(config.page_size, config.min_loading).unwrap_or_else(|e| {
        tracing::debug!(page_size = config.page_size, error = %e, "invalid page size, using default");
        QueryController::default()
    });

    let mut state = AppState::new(controller, load_theme(config));
    state.api = RecipeApiClient::new(config.api_base_url.clone(), config.recipes_path.clone());
    state.filter_fields.clone_from(&config.filter_fields);
    state.page_sizes = config.effective_page_sizes();
    state
}

fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::expand_tilde(theme_file);
        return Theme::from_file(&path).unwrap_or_else(|e| {
            tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
            Theme::default()
        });
    }

    config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
        Theme::from_name(theme_name).unwrap_or_else(|| {
            tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
            Theme::default()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn test_parses_all_keys() {
        let config = Config::from_zellij(&map(&[
            ("api_base_url", "https://recipes.example.com/"),
            ("recipes_path", "v2/recipes"),
            ("page_size", "25"),
            ("page_sizes", "50, 25,10,25"),
            ("min_loading_ms", "0"),
            ("filter_fields", "cuisine,,ingredient "),
            ("theme", "cream-light"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.api_base_url, "https://recipes.example.com/");
        assert_eq!(config.recipes_path, "v2/recipes");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.page_sizes, vec![10, 25, 50]);
        assert_eq!(config.min_loading, Duration::ZERO);
        assert_eq!(config.filter_fields, vec!["cuisine", "ingredient"]);
        assert_eq!(config.theme_name.as_deref(), Some("cream-light"));
        assert_eq!(config.theme_file, None);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_bad_values_fall_back_per_key() {
        let config = Config::from_zellij(&map(&[
            ("page_size", "0"),
            ("page_sizes", "10,abc"),
            ("min_loading_ms", "-5"),
            ("filter_fields", " , "),
            ("api_base_url", "  "),
        ]));

        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.page_sizes, DEFAULT_PAGE_SIZES.to_vec());
        assert_eq!(config.min_loading, DEFAULT_MIN_LOADING);
        assert_eq!(config.filter_fields.len(), DEFAULT_FILTER_FIELDS.len());
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_initialize_applies_config() {
        let config = Config {
            api_base_url: "http://kitchen:9000/".to_string(),
            page_size: 20,
            page_sizes: vec![10, 50],
            filter_fields: vec!["cuisine".to_string()],
            ..Config::default()
        };

        let state = initialize(&config);

        assert_eq!(state.api.endpoint(), "http://kitchen:9000/api/recipes");
        assert_eq!(state.controller.page_request().limit, 20);
        assert_eq!(state.page_sizes, vec![10, 20, 50]);
        assert_eq!(state.filter_fields, vec!["cuisine"]);
        assert!(!state.controller.is_loading());
    }

    #[test]
    fn test_initialize_survives_zero_page_size() {
        let config = Config {
            page_size: 0,
            ..Config::default()
        };

        let state = initialize(&config);

        assert_eq!(state.controller.page_request().limit, DEFAULT_PAGE_SIZE);
        assert_eq!(state.page_sizes, DEFAULT_PAGE_SIZES.to_vec());
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let no_scheme = Config {
            api_base_url: "localhost:8000".to_string(),
            ..Config::default()
        };
        assert!(matches!(no_scheme.validate(), Err(RecipeBrowserError::Config(_))));

        let no_fields = Config {
            filter_fields: vec![],
            ..Config::default()
        };
        assert!(no_fields.validate().is_err());
    }

    #[test]
    fn test_initialize_replaces_invalid_config() {
        let config = Config {
            api_base_url: "ftp://recipes".to_string(),
            page_size: 25,
            theme_name: Some("brick-night".to_string()),
            ..Config::default()
        };

        let state = initialize(&config);

        assert_eq!(state.api.endpoint(), "http://localhost:8000/api/recipes");
        assert_eq!(state.controller.page_request().limit, DEFAULT_PAGE_SIZE);
        assert_eq!(state.theme.name, "brick-night");
    }

    #[test]
    fn test_missing_theme_file_falls_back() {
        let config = Config {
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };

        assert_eq!(load_theme(&config).name, Theme::default().name);
    }
}
