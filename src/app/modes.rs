//! Input mode state machine.
//!
//! The browser is in one of two modes:
//! - **Browse**: navigate results, page, change page size, open details
//! - **`EditingFilters`**: keystrokes go into the filter draft
//!
//! Whether the detail drawer is open is not a mode; it lives in the query
//! controller's [`Selection`](crate::query::Selection) so that it survives
//! reloads.

/// Current input handling mode.
///
/// Controls which keybindings are active and what the footer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Default navigation mode.
    ///
    /// Keys: j/k (move), Enter (details), / (filters), c (clear filters),
    /// h/l (page), +/- (page size), r (retry), Esc (close details, then forget the selection), q (quit).
    #[default]
    Browse,

    /// Typing into the filter panel.
    ///
    /// Keys: characters (type), Tab/Shift+Tab (field), Enter (apply),
    /// Ctrl+x (clear all), Esc (discard draft).
    EditingFilters,
}
