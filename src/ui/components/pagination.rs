//! Pagination strip renderer.
//!
//! ```text
//! ‹ 1 … 3 4 [5] 6 7 … 10 ›   Showing 61-75 of 150 recipes · 15 per page
//! ```

use crate::ui::helpers::{position_cursor, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PageSlot, PaginationInfo};

/// Renders the strip on one line. Returns the next free row.
pub fn render_pagination(row: usize, info: &PaginationInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let mut used = 0;
    let mut put = |text: &str, color: &str, bold: bool| {
        let text = truncate(text, cols.saturating_sub(used));
        if bold {
            print!("{}", Theme::bold());
        }
        print!("{}{text}{}", Theme::fg(color), Theme::reset());
        used += width(&text);
    };

    let prev_color = if info.current_page > 1 {
        &theme.colors.text_normal
    } else {
        &theme.colors.text_dim
    };
    put(" ‹ ", prev_color, false);

    for slot in &info.slots {
        match slot {
            PageSlot::Page(page) if *page == info.current_page => {
                put(&format!("[{page}]"), &theme.colors.accent, true);
            }
            PageSlot::Page(page) => put(&page.to_string(), &theme.colors.text_normal, false),
            PageSlot::Gap => put("…", &theme.colors.text_dim, false),
        }
        put(" ", &theme.colors.text_dim, false);
    }

    let next_color = if info.current_page < info.total_pages {
        &theme.colors.text_normal
    } else {
        &theme.colors.text_dim
    };
    put("›  ", next_color, false);

    put(
        &format!(" {} · {}", info.summary, info.limit_label),
        &theme.colors.text_dim,
        false,
    );

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}
