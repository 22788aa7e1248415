//! Detail drawer renderer.
//!
//! Drawn as a column on the right of the results, separated by a vertical
//! rule. Content that does not fit the drawer's height is cut off.

use crate::ui::helpers::{fit, position_cursor, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

const LABEL_WIDTH: usize = 12;

/// Screen region the drawer may draw into (1-indexed, `bottom` exclusive).
#[derive(Debug, Clone, Copy)]
pub struct DrawerArea {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub width: usize,
}

/// Renders the drawer into `area`.
pub fn render_detail(detail: &DetailInfo, theme: &Theme, area: DrawerArea) {
    let inner = area.width.saturating_sub(3);
    let mut lines: Vec<(String, Style)> = Vec::new();

    for line in wrap(&detail.title, inner) {
        lines.push((line, Style::Title));
    }
    lines.push(("─".repeat(inner), Style::Rule));

    for (label, value) in &detail.facts {
        lines.push((format!("{}{value}", fit(label, LABEL_WIDTH)), Style::Fact));
    }

    if let Some(description) = &detail.description {
        lines.push((String::new(), Style::Plain));
        for line in wrap(description, inner) {
            lines.push((line, Style::Plain));
        }
    }

    if !detail.nutrients.is_empty() {
        lines.push((String::new(), Style::Plain));
        lines.push(("Nutrition".to_string(), Style::Section));
        for (name, amount) in &detail.nutrients {
            lines.push((format!("{}{amount}", fit(name, LABEL_WIDTH)), Style::Fact));
        }
    }

    let height = area.bottom.saturating_sub(area.top);
    let mut content = lines.into_iter();
    for offset in 0..height {
        position_cursor(area.top + offset, area.left);
        print!("{}", Theme::fg(&theme.colors.border));
        print!("│ ");

        let (text, style) = content.next().unwrap_or_default();
        match style {
            Style::Title => {
                print!("{}", Theme::bold());
                print!("{}", Theme::fg(&theme.colors.header_fg));
            }
            Style::Section => {
                print!("{}", Theme::bold());
                print!("{}", Theme::fg(&theme.colors.accent));
            }
            Style::Rule => print!("{}", Theme::fg(&theme.colors.border)),
            Style::Fact => print!("{}", Theme::fg(&theme.colors.text_dim)),
            Style::Plain => print!("{}", Theme::fg(&theme.colors.text_normal)),
        }
        print!("{}", fit(&text, inner + 1));
        print!("{}", Theme::reset());
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Style {
    Title,
    Section,
    Rule,
    Fact,
    #[default]
    Plain,
}
