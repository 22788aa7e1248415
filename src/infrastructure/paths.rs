//! Sandbox path helpers.

use std::path::PathBuf;

/// Directory holding the plugin's trace files.
///
/// Resolves to `~/.local/share/zellij/recipe-browser` on the host when Zellij
/// was started from the home directory (`/host` follows Zellij's cwd).
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("recipe-browser")
}

/// Rewrites a leading `~` to `/host`, e.g. for a configured `theme_file`.
///
/// ```
/// use recipe_browser::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/paprika.toml"), "/host/themes/paprika.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/recipes.toml"), "/etc/recipes.toml");
/// assert_eq!(expand_tilde("~chef/x.toml"), "~chef/x.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}
