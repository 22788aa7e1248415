//! Load lifecycle and selection state owned by the query controller.

use crate::domain::{Recipe, ResultPage};

/// Static banner text shown when a fetch fails.
///
/// The underlying error is logged, never displayed.
pub const LOAD_FAILURE_MESSAGE: &str =
    "Failed to load recipes. Please make sure the API server is running.";

/// Where the current fetch cycle stands. Exactly one variant holds at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    /// No fetch has been issued yet.
    #[default]
    Idle,

    /// A fetch is outstanding. Says nothing about whether older data is still valid.
    Loading,

    /// The latest fetch succeeded.
    Loaded(ResultPage),

    /// The latest fetch failed; holds the user-facing message.
    Failed(String),
}

impl LoadState {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The loaded page, if the latest fetch succeeded.
    #[must_use]
    pub const fn page(&self) -> Option<&ResultPage> {
        match self {
            Self::Loaded(page) => Some(page),
            _ => None,
        }
    }

    /// The user-facing error message, if the latest fetch failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Short label for logs and spans.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Loaded(_) => "loaded",
            Self::Failed(_) => "failed",
        }
    }
}

/// Which empty state the result view should show for a successful, empty fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyResult {
    /// Filters are active and nothing matched them.
    Search,
    /// No filters are active and the catalog returned nothing.
    NoData,
}

/// Recipe picked for the detail drawer.
///
/// Survives reloads: changing filters or pages never clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    recipe: Option<Recipe>,
    open: bool,
}

impl Selection {
    #[must_use]
    pub const fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    /// True if the drawer is open and has a recipe to show.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open && self.recipe.is_some()
    }

    pub(crate) fn replace(&mut self, recipe: Recipe) {
        self.recipe = Some(recipe);
        self.open = true;
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
    }

    pub(crate) fn clear(&mut self) {
        self.recipe = None;
        self.open = false;
    }
}
