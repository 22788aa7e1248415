//! Error types for the recipe browser.
//!
//! [`RecipeBrowserError`] is the crate-wide error and [`Result`] its alias.
//! Failures coming back from the remote recipe API are described separately by
//! [`ApiError`], which is cheap to clone so it can travel inside application
//! events before the query controller absorbs it.

use thiserror::Error;

/// Failure of a single recipe API call.
///
/// The controller never shows these to the user verbatim; they are logged and
/// replaced with a static banner message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-success HTTP status.
    #[error("recipe API returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code reported by the host.
        status: u16,
        /// Leading part of the response body, for the log.
        body: String,
    },

    /// The response body was not a valid recipe page.
    #[error("failed to decode recipe page: {0}")]
    Decode(String),

    /// The request could not be built or sent.
    #[error("recipe API request failed: {0}")]
    Transport(String),
}

/// The main error type for recipe browser operations.
///
/// Most variants describe conditions the event handler reports to the plugin
/// shim, which logs them and skips the render.
///
/// # Examples
///
/// ```
/// use recipe_browser::RecipeBrowserError;
///
/// fn check_limit(limit: u32) -> Result<(), RecipeBrowserError> {
///     if limit == 0 {
///         return Err(RecipeBrowserError::InvalidPageRequest("limit must be positive".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(check_limit(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum RecipeBrowserError {
    /// A page or page size outside the allowed range was requested.
    #[error("Invalid page request: {0}")]
    InvalidPageRequest(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration value is unusable.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for recipe browser operations.
pub type Result<T> = std::result::Result<T, RecipeBrowserError>;
