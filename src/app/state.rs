//! Application state and view model computation.
//!
//! [`AppState`] wraps the [`QueryController`] (which owns everything that
//! decides *what* is being viewed) with the UI-only state the controller does
//! not care about: the table cursor, the input mode, the filter draft and the
//! theme.
//!
//! `compute_viewmodel` turns a snapshot of both into a
//! [`UIViewModel`](crate::ui::viewmodel::UIViewModel), deciding which of the
//! loading, error, empty or table presentations applies.

use super::filter_draft::FilterDraft;
use super::modes::InputMode;
use crate::api::RecipeApiClient;
use crate::domain::{Recipe, ResultPage};
use crate::query::{EmptyResult, LoadState, QueryController};
use crate::ui::pagination::page_slots;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BannerInfo, DetailInfo, DisplayItem, EmptyState, FilterFieldInfo, FilterPanelInfo, FooterInfo,
    HeaderInfo, PaginationInfo, ResultsView, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Filter fields offered by the filter panel unless configured otherwise.
pub const DEFAULT_FILTER_FIELDS: &[&str] = &["title", "cuisine", "ingredient", "rating", "total_time"];

/// Page sizes cycled by `+`/`-` unless configured otherwise.
pub const DEFAULT_PAGE_SIZES: &[u32] = &[10, 15, 25, 50];

/// Filter field whose value is highlighted inside result titles.
const TITLE_FIELD: &str = "title";

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Filters, page, load state and selection.
    pub controller: QueryController,

    /// Builds requests for the plugin shim to send.
    pub api: RecipeApiClient,

    /// Zero-based cursor row within the loaded page.
    pub cursor: usize,

    pub input_mode: InputMode,

    /// Filter panel buffers; only meaningful in `EditingFilters`.
    pub draft: FilterDraft,

    /// Fields shown in the filter panel, in display order.
    pub filter_fields: Vec<String>,

    /// Allowed page sizes, ascending.
    pub page_sizes: Vec<u32>,

    pub theme: Theme,
}

impl AppState {
    /// Creates a state around `controller` with the default API client,
    /// filter fields and page sizes.
    #[must_use]
    pub fn new(controller: QueryController, theme: Theme) -> Self {
        Self {
            controller,
            api: RecipeApiClient::default(),
            cursor: 0,
            input_mode: InputMode::Browse,
            draft: FilterDraft::default(),
            filter_fields: DEFAULT_FILTER_FIELDS.iter().map(ToString::to_string).collect(),
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            theme,
        }
    }

    /// Recipes on the loaded page; empty unless the latest fetch succeeded.
    #[must_use]
    pub fn visible_recipes(&self) -> &[Recipe] {
        self.controller
            .load_state()
            .page()
            .map(|page| page.items.as_slice())
            .unwrap_or_default()
    }

    /// Recipe under the cursor, if a page is loaded.
    #[must_use]
    pub fn cursor_recipe(&self) -> Option<&Recipe> {
        self.visible_recipes().get(self.cursor)
    }

    /// Moves the cursor down, wrapping to the top.
    pub fn move_cursor_down(&mut self) {
        let len = self.visible_recipes().len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    /// Moves the cursor up, wrapping to the bottom.
    pub fn move_cursor_up(&mut self) {
        let len = self.visible_recipes().len();
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
    }

    /// Puts the cursor back on the first row, e.g. after a new page lands.
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Next configured page size above (or below) the current limit.
    #[must_use]
    pub fn adjacent_page_size(&self, larger: bool) -> Option<u32> {
        let current = self.controller.page_request().limit;
        let sizes = self.page_sizes.iter().copied();
        if larger {
            sizes.filter(|&size| size > current).min()
        } else {
            sizes.filter(|&size| size < current).max()
        }
    }

    /// Opens the filter panel with a draft seeded from the applied filters.
    pub fn begin_filter_edit(&mut self) {
        self.draft = FilterDraft::new(&self.filter_fields, self.controller.filters());
        self.input_mode = InputMode::EditingFilters;
    }

    /// Closes the filter panel and drops the draft.
    pub fn end_filter_edit(&mut self) {
        self.draft = FilterDraft::default();
        self.input_mode = InputMode::Browse;
    }

    /// Computes a renderable view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!(
            "compute_viewmodel",
            rows = rows,
            cols = cols,
            load_state = self.controller.load_state().label()
        )
        .entered();

        let available_rows = self.calculate_available_rows(rows);
        let controller = &self.controller;

        let matcher = controller
            .filters()
            .get(TITLE_FIELD)
            .filter(|query| !query.is_empty())
            .map(|query| (SkimMatcherV2::default(), query));

        let results = match controller.load_state() {
            LoadState::Idle | LoadState::Failed(_) => ResultsView::Blank,
            LoadState::Loading => {
                let stale = controller.stale_page().map_or_else(Vec::new, |page| {
                    let (start, end) = Self::window(page.items.len(), 0, available_rows);
                    page.items[start..end]
                        .iter()
                        .map(|recipe| self.compute_display_item(recipe, false, matcher.as_ref()))
                        .collect()
                });
                let limit = controller.page_request().limit as usize;
                ResultsView::Loading {
                    stale,
                    placeholder_rows: limit.min(available_rows),
                }
            }
            LoadState::Loaded(page) if page.is_empty() => {
                ResultsView::Empty(Self::compute_empty_state(controller.empty_result()))
            }
            LoadState::Loaded(page) => {
                let (start, end) = Self::window(page.items.len(), self.cursor, available_rows);
                let items = page.items[start..end]
                    .iter()
                    .enumerate()
                    .map(|(offset, recipe)| {
                        self.compute_display_item(recipe, start + offset == self.cursor, matcher.as_ref())
                    })
                    .collect();
                ResultsView::Table {
                    items,
                    selected_index: self.cursor.saturating_sub(start),
                }
            }
        };

        let pagination = controller
            .load_state()
            .page()
            .filter(|page| !page.is_empty())
            .map(|page| self.compute_pagination(page));

        UIViewModel {
            header: HeaderInfo {
                title: "Recipe Collection".to_string(),
                subtitle: "Discover delicious recipes from around the world".to_string(),
            },
            filter_panel: self.compute_filter_panel(),
            banner: controller.load_state().error().map(|message| BannerInfo {
                message: message.to_string(),
            }),
            results,
            pagination,
            detail: self.compute_detail(),
            footer: self.compute_footer(),
        }
    }

    /// Returns the `[start, end)` slice of `len` rows to show so that `cursor`
    /// stays visible, centred where possible.
    fn window(len: usize, cursor: usize, available_rows: usize) -> (usize, usize) {
        let mut start = cursor.saturating_sub(available_rows / 2);
        let end = (start + available_rows).min(len);
        if end - start.min(end) < available_rows && len >= available_rows {
            start = end.saturating_sub(available_rows);
        }
        (start.min(end), end)
    }

    fn compute_display_item(
        &self,
        recipe: &Recipe,
        is_selected: bool,
        matcher: Option<&(SkimMatcherV2, &str)>,
    ) -> DisplayItem {
        let is_open = self.controller.selection().is_open()
            && self.controller.selection().recipe().is_some_and(|open| open.id == recipe.id);

        DisplayItem {
            title: recipe.title.clone(),
            cuisine: recipe.cuisine.clone().unwrap_or_else(|| "-".to_string()),
            rating: recipe.rating.map_or_else(|| "-".to_string(), |r| format!("★ {r:.1}")),
            total_time: recipe
                .total_time
                .map_or_else(|| "-".to_string(), Recipe::format_minutes),
            is_selected,
            is_open,
            highlight_ranges: matcher
                .map_or_else(Vec::new, |(m, query)| Self::compute_highlight_ranges(&recipe.title, query, m)),
        }
    }

    /// Coalesces fuzzy match indices into contiguous `(start, end)` char ranges.
    fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_empty_state(kind: Option<EmptyResult>) -> EmptyState {
        match kind {
            Some(EmptyResult::Search) => EmptyState {
                message: "No recipes match your search".to_string(),
                subtitle: "Try different filters, or press c to clear them".to_string(),
            },
            Some(EmptyResult::NoData) | None => EmptyState {
                message: "No recipes available".to_string(),
                subtitle: "The catalog is empty. Press r to reload".to_string(),
            },
        }
    }

    fn compute_pagination(&self, page: &ResultPage) -> PaginationInfo {
        let request = self.controller.page_request();
        let summary = page.item_range(request).map_or_else(String::new, |(first, last)| {
            format!("Showing {first}-{last} of {} recipes", page.total_count)
        });

        PaginationInfo {
            current_page: request.page,
            total_pages: page.total_pages,
            slots: page_slots(page.total_pages, request.page),
            summary,
            limit_label: format!("{} per page", request.limit),
        }
    }

    fn compute_filter_panel(&self) -> FilterPanelInfo {
        match self.input_mode {
            InputMode::EditingFilters => FilterPanelInfo {
                editing: true,
                fields: self
                    .draft
                    .fields()
                    .enumerate()
                    .map(|(idx, (name, value))| FilterFieldInfo {
                        name: name.to_string(),
                        value: value.to_string(),
                        is_focused: idx == self.draft.focused(),
                    })
                    .collect(),
            },
            InputMode::Browse => FilterPanelInfo {
                editing: false,
                fields: self
                    .controller
                    .filters()
                    .active()
                    .map(|(name, value)| FilterFieldInfo {
                        name: name.to_string(),
                        value: value.to_string(),
                        is_focused: false,
                    })
                    .collect(),
            },
        }
    }

    fn compute_detail(&self) -> Option<DetailInfo> {
        let selection = self.controller.selection();
        if !selection.is_open() {
            return None;
        }
        let recipe = selection.recipe()?;

        let mut facts = Vec::new();
        if let Some(cuisine) = &recipe.cuisine {
            facts.push(("Cuisine".to_string(), cuisine.clone()));
        }
        if let Some(rating) = recipe.rating {
            facts.push(("Rating".to_string(), format!("★ {rating:.1}")));
        }
        for (label, minutes) in [
            ("Prep time", recipe.prep_time),
            ("Cook time", recipe.cook_time),
            ("Total time", recipe.total_time),
        ] {
            if let Some(minutes) = minutes {
                facts.push((label.to_string(), Recipe::format_minutes(minutes)));
            }
        }
        if let Some(serves) = &recipe.serves {
            facts.push(("Serves".to_string(), Recipe::nutrient_label(serves)));
        }

        let nutrients = recipe
            .nutrients
            .iter()
            .flatten()
            .map(|(name, amount)| (name.clone(), Recipe::nutrient_label(amount)))
            .collect();

        Some(DetailInfo {
            title: recipe.title.clone(),
            facts,
            description: recipe.description.clone().filter(|d| !d.trim().is_empty()),
            nutrients,
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::EditingFilters => {
                "Tab/Shift+Tab: field  Enter: apply  Ctrl+x: clear all  Esc: cancel".to_string()
            }
            InputMode::Browse if self.controller.selection().is_open() => {
                "j/k: move  Enter: details  Esc: close details  /: filters  h/l: page  +/-: size  q: quit"
                    .to_string()
            }
            InputMode::Browse => {
                "j/k: move  Enter: details  /: filters  c: clear  h/l: page  +/-: size  r: reload  q: quit"
                    .to_string()
            }
        };
        FooterInfo { keybindings }
    }

    /// Rows left for table rows after the fixed chrome.
    ///
    /// Chrome: blank, title, subtitle, border, filter panel, border, table
    /// header, pagination, border, footer; plus the banner when present.
    fn calculate_available_rows(&self, total_rows: usize) -> usize {
        let filter_rows = match self.input_mode {
            InputMode::Browse => 1,
            InputMode::EditingFilters => self.filter_fields.len() + 2,
        };
        let banner_rows = usize::from(self.controller.load_state().error().is_some());
        total_rows.saturating_sub(9 + filter_rows + banner_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApiError, FilterSet};
    use crate::query::LOAD_FAILURE_MESSAGE;
    use std::time::{Duration, Instant};

    fn state() -> AppState {
        AppState::new(QueryController::new(15, Duration::ZERO).unwrap(), Theme::default())
    }

    fn page(titles: &[&str], total_pages: u32, total_count: u64) -> ResultPage {
        ResultPage {
            items: titles
                .iter()
                .enumerate()
                .map(|(i, title)| Recipe::new(i as u64, *title))
                .collect(),
            total_pages,
            total_count,
        }
    }

    fn loaded(state: &mut AppState, result: ResultPage) {
        let now = Instant::now();
        let ticket = state.controller.refresh(now);
        state.controller.settle(ticket.generation, Ok(result), now);
    }

    #[test]
    fn test_idle_is_blank() {
        let vm = state().compute_viewmodel(30, 100);
        assert_eq!(vm.results, ResultsView::Blank);
        assert!(vm.banner.is_none());
        assert!(vm.pagination.is_none());
        assert_eq!(vm.header.title, "Recipe Collection");
    }

    #[test]
    fn test_loaded_page_shows_table_and_pagination() {
        let mut state = state();
        loaded(&mut state, page(&["Pad Thai", "Pho", "Laksa"], 4, 52));

        let vm = state.compute_viewmodel(30, 100);
        match &vm.results {
            ResultsView::Table { items, selected_index } => {
                assert_eq!(items.len(), 3);
                assert_eq!(*selected_index, 0);
                assert!(items[0].is_selected);
                assert_eq!(items[0].rating, "-");
            }
            other => panic!("unexpected results view: {other:?}"),
        }

        let pagination = vm.pagination.unwrap();
        assert_eq!(pagination.total_pages, 4);
        assert_eq!(pagination.summary, "Showing 1-3 of 52 recipes");
        assert_eq!(pagination.limit_label, "15 per page");
    }

    #[test]
    fn test_loading_keeps_stale_rows_without_pagination() {
        let mut state = state();
        loaded(&mut state, page(&["Pad Thai", "Pho"], 1, 2));
        state.controller.set_limit(25, Instant::now()).unwrap();

        let vm = state.compute_viewmodel(30, 100);
        match vm.results {
            ResultsView::Loading { stale, placeholder_rows } => {
                assert_eq!(stale.len(), 2);
                assert_eq!(placeholder_rows, 25.min(30 - 10));
            }
            other => panic!("unexpected results view: {other:?}"),
        }
        assert!(vm.pagination.is_none());
    }

    #[test]
    fn test_failure_shows_banner_and_hides_results() {
        let mut state = state();
        loaded(&mut state, page(&["Pad Thai"], 1, 1));

        let now = Instant::now();
        let ticket = state.controller.refresh(now);
        state
            .controller
            .settle(ticket.generation, Err(ApiError::Transport("refused".to_string())), now);

        let vm = state.compute_viewmodel(30, 100);
        assert_eq!(vm.banner.unwrap().message, LOAD_FAILURE_MESSAGE);
        assert_eq!(vm.results, ResultsView::Blank);
        assert!(vm.pagination.is_none());
    }

    #[test]
    fn test_empty_state_depends_on_active_filters() {
        let mut state = state();
        loaded(&mut state, page(&[], 0, 0));
        let vm = state.compute_viewmodel(30, 100);
        assert!(matches!(&vm.results, ResultsView::Empty(e) if e.message == "No recipes available"));

        let now = Instant::now();
        let ticket = state
            .controller
            .set_filters(FilterSet::new().with("cuisine", "mexican"), now)
            .unwrap();
        state.controller.settle(ticket.generation, Ok(page(&[], 0, 0)), now);
        let vm = state.compute_viewmodel(30, 100);
        assert!(matches!(&vm.results, ResultsView::Empty(e) if e.message == "No recipes match your search"));
    }

    #[test]
    fn test_title_filter_is_highlighted() {
        let mut state = state();
        let now = Instant::now();
        let ticket = state
            .controller
            .set_filters(FilterSet::new().with("title", "soup"), now)
            .unwrap();
        state
            .controller
            .settle(ticket.generation, Ok(page(&["Lentil Soup"], 1, 1)), now);

        let vm = state.compute_viewmodel(30, 100);
        let ResultsView::Table { items, .. } = vm.results else {
            panic!("expected table");
        };
        assert_eq!(items[0].highlight_ranges, vec![(7, 11)]);
    }

    #[test]
    fn test_cursor_window_follows_selection() {
        let mut state = state();
        let titles: Vec<String> = (0..15).map(|i| format!("Recipe {i}")).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        loaded(&mut state, page(&refs, 1, 15));

        for _ in 0..14 {
            state.move_cursor_down();
        }
        // 20 rows leave 10 for the table.
        let vm = state.compute_viewmodel(20, 100);
        let ResultsView::Table { items, selected_index } = vm.results else {
            panic!("expected table");
        };
        assert_eq!(items.len(), 10);
        assert_eq!(items[selected_index].title, "Recipe 14");
    }

    #[test]
    fn test_cursor_wraps() {
        let mut state = state();
        loaded(&mut state, page(&["a", "b", "c"], 1, 3));
        state.move_cursor_up();
        assert_eq!(state.cursor, 2);
        state.move_cursor_down();
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_adjacent_page_size() {
        let mut state = state();
        assert_eq!(state.adjacent_page_size(true), Some(25));
        assert_eq!(state.adjacent_page_size(false), Some(10));

        state.controller.set_limit(50, Instant::now()).unwrap();
        assert_eq!(state.adjacent_page_size(true), None);

        state.controller.set_limit(12, Instant::now()).unwrap();
        assert_eq!(state.adjacent_page_size(true), Some(15));
        assert_eq!(state.adjacent_page_size(false), Some(10));
    }

    #[test]
    fn test_detail_lists_known_fields() {
        let mut state = state();
        let mut recipe = Recipe::new(1, "Pho");
        recipe.cuisine = Some("Vietnamese".to_string());
        recipe.total_time = Some(150.0);
        recipe.description = Some("   ".to_string());
        state.controller.select(recipe);

        let detail = state.compute_viewmodel(30, 100).detail.unwrap();
        assert_eq!(detail.title, "Pho");
        assert_eq!(
            detail.facts,
            vec![
                ("Cuisine".to_string(), "Vietnamese".to_string()),
                ("Total time".to_string(), "2h 30m".to_string()),
            ]
        );
        assert!(detail.description.is_none());

        state.controller.close_detail();
        assert!(state.compute_viewmodel(30, 100).detail.is_none());
    }
}
