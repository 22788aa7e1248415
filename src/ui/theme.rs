//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML files; three are built in and embedded at compile time, and
//! a custom one can be loaded from disk via the `theme_file` option.
//!
//! # Built-in Themes
//!
//! - `saffron-dark`: saffron and brick on a dark terminal (default)
//! - `brick-night`: deep red header band, saffron accents
//! - `cream-light`: for light terminals
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e9c46a"
//! # header_bg = "#4b1214"   (optional)
//! selection_fg = "#1c1917"
//! selection_bg = "#e9c46a"
//! text_normal = "#fcf5e5"
//! text_dim = "#ac9979"
//! border = "#5f1618"
//! filter_border = "#b3444a"
//! filter_focus_fg = "#f6dd7b"
//! match_highlight_fg = "#1c1917"
//! match_highlight_bg = "#d16669"
//! empty_state_fg = "#f3d555"
//! error_fg = "#f59a9d"
//! accent = "#d16669"
//! ```

use crate::domain::{RecipeBrowserError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "saffron-dark";

/// Color scheme for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Colors for every UI element, as hex strings like `"#fcf5e5"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Title and column header text.
    pub header_fg: String,
    /// Optional background band behind the title.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Cursor row.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Subtitle, footer, stale rows, secondary detail text.
    pub text_dim: String,

    /// Separator lines.
    pub border: String,

    /// Filter panel frame.
    pub filter_border: String,
    /// Focused filter field label.
    pub filter_focus_fg: String,

    /// Title-filter match highlight.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Failure banner.
    pub error_fg: String,

    /// Ratings, the current page and the open-recipe marker.
    pub accent: String,
}

impl Theme {
    /// Loads a built-in theme by name, or `None` for an unknown name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "saffron-dark" => include_str!("../../themes/saffron-dark.toml"),
            "brick-night" => include_str!("../../themes/brick-night.toml"),
            "cream-light" => include_str!("../../themes/cream-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeBrowserError::Io`] if the file cannot be read and
    /// [`RecipeBrowserError::Theme`] if it does not parse as a theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| RecipeBrowserError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Parses `#rrggbb`; anything malformed renders white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the `saffron-dark` theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in saffron-dark theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_themes_parse() {
        for name in ["saffron-dark", "brick-night", "cream-light"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("nope").is_none());
        assert_eq!(Theme::default().name, DEFAULT_THEME);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let contents = include_str!("../../themes/cream-light.toml").replace("cream-light", "mine");
        file.write_all(contents.as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "mine");
        assert_eq!(theme.colors.header_bg.as_deref(), Some("#fcf5e5"));
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Theme::from_file(dir.path().join("missing.toml")),
            Err(RecipeBrowserError::Io(_))
        ));

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "name = \"x\"\n[colors]\nheader_fg = 3\n").unwrap();
        assert!(matches!(Theme::from_file(&bad), Err(RecipeBrowserError::Theme(_))));
    }

    #[test]
    fn test_escape_sequences() {
        assert_eq!(Theme::fg("#9b2226"), "\u{1b}[38;2;155;34;38m");
        assert_eq!(Theme::bg("e9c46a"), "\u{1b}[48;2;233;196;106m");
        assert_eq!(Theme::fg("#zz"), "\u{1b}[38;2;255;255;255m");
    }
}
