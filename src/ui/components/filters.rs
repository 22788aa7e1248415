//! Filter panel renderer.
//!
//! Collapsed it is a single summary line of the applied filters. While editing
//! it becomes a framed box with one line per field.

use crate::ui::helpers::{fit, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterPanelInfo;

/// Horizontal margin around the editing box.
const PANEL_MARGIN: usize = 1;

/// Width of the field-name column inside the editing box.
const LABEL_WIDTH: usize = 14;

/// Renders the panel starting at `row` within the first `cols` columns.
///
/// Returns the next free row: `row + 1` collapsed, `row + fields + 2` editing.
pub fn render_filter_panel(row: usize, panel: &FilterPanelInfo, theme: &Theme, cols: usize) -> usize {
    if panel.editing {
        render_editing(row, panel, theme, cols)
    } else {
        render_summary(row, panel, theme, cols)
    }
}

fn render_summary(row: usize, panel: &FilterPanelInfo, theme: &Theme, cols: usize) -> usize {
    let summary = if panel.fields.is_empty() {
        "none".to_string()
    } else {
        panel
            .fields
            .iter()
            .map(|field| format!("{}: {}", field.name, field.value))
            .collect::<Vec<_>>()
            .join(" · ")
    };

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.filter_border));
    print!(" Filters ");
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(if panel.fields.is_empty() {
        &theme.colors.text_dim
    } else {
        &theme.colors.text_normal
    }));
    print!("{}", fit(&summary, cols.saturating_sub(9)));
    print!("{}", Theme::reset());
    row + 1
}

fn render_editing(row: usize, panel: &FilterPanelInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(PANEL_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(PANEL_MARGIN);

    let title = "─ Filters ";
    position_cursor(row, 1);
    print!("{margin}");
    print!("{}", Theme::fg(&theme.colors.filter_border));
    print!("┌{title}{}┐", "─".repeat(inner_width.saturating_sub(width(title))));
    print!("{}", Theme::reset());

    let mut current_row = row + 1;
    for field in &panel.fields {
        position_cursor(current_row, 1);
        print!("{margin}");
        print!("{}", Theme::fg(&theme.colors.filter_border));
        print!("│");

        let marker = if field.is_focused { " ▸ " } else { "   " };
        let label = fit(&field.name, LABEL_WIDTH);
        if field.is_focused {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.filter_focus_fg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{marker}{label}");
        print!("{}", Theme::reset());

        let cursor = if field.is_focused { "▏" } else { "" };
        let value_width = inner_width.saturating_sub(width(marker) + LABEL_WIDTH);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", fit(&format!("{}{cursor}", field.value), value_width));

        print!("{}", Theme::fg(&theme.colors.filter_border));
        print!("│");
        print!("{}", Theme::reset());
        current_row += 1;
    }

    position_cursor(current_row, 1);
    print!("{margin}");
    print!("{}", Theme::fg(&theme.colors.filter_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    current_row + 1
}
