//! Failure banner renderer.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::BannerInfo;

/// Renders the failure message on one line. Returns the next free row.
pub fn render_banner(row: usize, banner: &BannerInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.error_fg));
    print!("{}", fit(&format!(" ✗ {}", banner.message), cols));
    print!("{}", Theme::reset());
    row + 1
}
