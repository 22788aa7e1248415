//! Composable UI component renderers.
//!
//! Each component prints one part of the screen at a given row and returns the
//! next free row.
//!
//! # Components
//!
//! - [`header`]: title and subtitle
//! - [`filters`]: filter summary line or editing box
//! - [`banner`]: failure message
//! - [`table`]: results table, stale rows and loading skeleton
//! - [`empty`]: empty-result message
//! - [`pagination`]: page strip and result summary
//! - [`detail`]: detail drawer on the right
//! - [`footer`]: keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank]
//! [Title]
//! [Subtitle]
//! [Border]
//! [Filter panel: 1 line, or fields + 2 while editing]  │ [Detail drawer]
//! [Border]                                             │
//! [Banner, if failed]                                  │
//! [Table header]                                       │
//! [Rows | loading rows | empty state]                  │
//! ...                                                  │
//! [Pagination]                                         │
//! [Border]
//! [Footer]
//! ```

mod banner;
mod detail;
mod empty;
mod filters;
mod footer;
mod header;
mod pagination;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ResultsView, UIViewModel};

use banner::render_banner;
use detail::{render_detail, DrawerArea};
use empty::render_empty_state;
use filters::render_filter_panel;
use footer::render_footer;
use header::render_header;
use pagination::render_pagination;
use table::{render_loading_rows, render_table_headers, render_table_rows};

/// Below this width the drawer replaces the results instead of sitting beside them.
const SPLIT_MIN_COLS: usize = 80;
const DRAWER_MIN_COLS: usize = 30;
const DRAWER_MAX_COLS: usize = 48;

/// Renders a horizontal rule across `cols` columns. Returns `row + 1`.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Splits `cols` into (results width, drawer width).
const fn split_columns(cols: usize, drawer_open: bool) -> (usize, usize) {
    if !drawer_open {
        return (cols, 0);
    }
    if cols < SPLIT_MIN_COLS {
        return (0, cols);
    }
    let mut drawer = cols * 2 / 5;
    if drawer < DRAWER_MIN_COLS {
        drawer = DRAWER_MIN_COLS;
    }
    if drawer > DRAWER_MAX_COLS {
        drawer = DRAWER_MAX_COLS;
    }
    (cols - drawer, drawer)
}

/// Renders the whole screen for `vm`.
pub fn render_screen(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let (main_cols, drawer_cols) = split_columns(cols, vm.detail.is_some());

    let mut current_row = 2;
    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    let body_top = current_row;

    let footer_row = rows;
    let bottom_border_row = rows.saturating_sub(1);
    let pagination_row = rows.saturating_sub(2);

    if main_cols > 0 {
        current_row = render_filter_panel(current_row, &vm.filter_panel, theme, main_cols);
        current_row = render_border(current_row, &theme.colors.border, main_cols);

        if let Some(banner) = &vm.banner {
            current_row = render_banner(current_row, banner, theme, main_cols);
        }

        match &vm.results {
            ResultsView::Blank => {}
            ResultsView::Loading {
                stale,
                placeholder_rows,
            } => {
                current_row = render_table_headers(current_row, theme, main_cols, true);
                render_loading_rows(current_row, stale, *placeholder_rows, theme, main_cols);
            }
            ResultsView::Table { items, .. } => {
                current_row = render_table_headers(current_row, theme, main_cols, false);
                render_table_rows(current_row, items, theme, main_cols);
            }
            ResultsView::Empty(empty) => {
                render_empty_state(current_row, empty, theme, main_cols);
            }
        }

        if let Some(pagination) = &vm.pagination {
            render_pagination(pagination_row, pagination, theme, main_cols);
        }
    }

    if let Some(detail) = &vm.detail {
        render_detail(
            detail,
            theme,
            DrawerArea {
                top: body_top,
                bottom: bottom_border_row,
                left: main_cols + 1,
                width: drawer_cols,
            },
        );
    }

    render_border(bottom_border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_columns() {
        assert_eq!(split_columns(120, false), (120, 0));
        assert_eq!(split_columns(120, true), (72, 48));
        assert_eq!(split_columns(90, true), (54, 36));
        assert_eq!(split_columns(60, true), (0, 60));
    }
}
