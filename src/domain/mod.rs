//! Domain layer for the recipe browser.
//!
//! Plain data types shared by the query controller, the API client and the UI,
//! independent of Zellij-specific APIs.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`filters`]: Filter set submitted by the filter panel
//! - [`page`]: Page requests and result pages
//! - [`recipe`]: Opaque recipe record

pub mod error;
pub mod filters;
pub mod page;
pub mod recipe;

pub use error::{ApiError, RecipeBrowserError, Result};
pub use filters::FilterSet;
pub use page::{PageRequest, ResultPage, DEFAULT_PAGE_SIZE};
pub use recipe::Recipe;
