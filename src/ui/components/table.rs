//! Results table renderer.
//!
//! Four columns: TITLE (flexible), CUISINE, RATING and TIME. Rows are prefixed
//! with a two-column marker that shows which recipe is open in the drawer.

use crate::ui::helpers::{self, fit, position_cursor, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const MARKER_WIDTH: usize = 2;
const CUISINE_WIDTH: usize = 16;
const RATING_WIDTH: usize = 7;
const TIME_WIDTH: usize = 9;
const MIN_TITLE_WIDTH: usize = 10;

fn title_width(cols: usize) -> usize {
    cols.saturating_sub(MARKER_WIDTH + CUISINE_WIDTH + 1 + RATING_WIDTH + 1 + TIME_WIDTH)
        .max(MIN_TITLE_WIDTH)
}

/// Renders the column headers. When `loading` is set a loading marker is
/// appended after the last column.
///
/// Returns the next free row.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize, loading: bool) -> usize {
    let line = format!(
        "{}{} {} {} {}",
        " ".repeat(MARKER_WIDTH),
        fit("TITLE", title_width(cols)),
        fit("CUISINE", CUISINE_WIDTH),
        fit("RATING", RATING_WIDTH),
        fit("TIME", TIME_WIDTH),
    );

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", truncate(&line, cols));
    print!("{}", Theme::reset());

    if loading {
        position_cursor(row, 1);
        print!("{}", Theme::fg(&theme.colors.accent));
        print!("{}", fit(" ⟳", MARKER_WIDTH));
        print!("{}", Theme::reset());
    }
    row + 1
}

/// Renders `items` one per row. Returns the next free row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols, false);
    }
    current_row
}

/// Renders the previous page's rows dimmed, or skeleton rows if there is none.
///
/// Returns the next free row.
pub fn render_loading_rows(
    row: usize,
    stale: &[DisplayItem],
    placeholder_rows: usize,
    theme: &Theme,
    cols: usize,
) -> usize {
    if !stale.is_empty() {
        let mut current_row = row;
        for item in stale {
            current_row = render_table_row(current_row, item, theme, cols, true);
        }
        return current_row;
    }

    let bar_width = title_width(cols).min(28);
    for offset in 0..placeholder_rows {
        position_cursor(row + offset, 1);
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        // Vary bar lengths a little so the skeleton reads as rows.
        let len = bar_width.saturating_sub((offset * 7) % 9);
        print!("{}{}", " ".repeat(MARKER_WIDTH), "░".repeat(len));
        print!("{}", Theme::reset());
    }
    row + placeholder_rows
}

fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize, stale: bool) -> usize {
    let title_cols = title_width(cols);

    position_cursor(row, 1);
    if stale {
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
    } else if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    if item.is_open && !stale {
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.accent));
        }
        print!("{}", fit("▶", MARKER_WIDTH));
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
    } else {
        print!("{}", " ".repeat(MARKER_WIDTH));
    }

    let title = truncate(&item.title, title_cols);
    if stale {
        print!("{title}");
    } else {
        helpers::render_highlighted_text(&title, &item.highlight_ranges, theme, item.is_selected);
    }
    print!("{} ", " ".repeat(title_cols.saturating_sub(width(&title))));

    print!("{} ", fit(&item.cuisine, CUISINE_WIDTH));

    if !stale && !item.is_selected && item.rating != "-" {
        print!("{}", Theme::fg(&theme.colors.accent));
        print!("{} ", fit(&item.rating, RATING_WIDTH));
        print!("{}", Theme::fg(&theme.colors.text_normal));
    } else {
        print!("{} ", fit(&item.rating, RATING_WIDTH));
    }

    print!("{}", fit(&item.total_time, TIME_WIDTH));

    let used = MARKER_WIDTH + title_cols + 1 + CUISINE_WIDTH + 1 + RATING_WIDTH + 1 + TIME_WIDTH;
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
    row + 1
}
