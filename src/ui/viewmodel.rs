//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings and flags only; every decision
//! about what to show (loading, error, empty, table) is made while computing
//! them, so the components stay dumb.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    pub filter_panel: FilterPanelInfo,

    /// Static failure message, shown above the results.
    pub banner: Option<BannerInfo>,

    pub results: ResultsView,

    /// Present only when a loaded, non-empty page is on screen.
    pub pagination: Option<PaginationInfo>,

    /// Present while the detail drawer is open.
    pub detail: Option<DetailInfo>,

    pub footer: FooterInfo,
}

/// What occupies the results area.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    /// Nothing to show: before the first fetch, or after a failure.
    Blank,

    /// A fetch is outstanding.
    ///
    /// `stale` holds the previous page's rows, rendered dimmed. When there is
    /// no previous page, `placeholder_rows` skeleton rows are drawn instead.
    Loading {
        stale: Vec<DisplayItem>,
        placeholder_rows: usize,
    },

    /// The loaded page.
    Table {
        items: Vec<DisplayItem>,
        /// Index of the cursor row within `items`.
        selected_index: usize,
    },

    /// The fetch succeeded with no recipes.
    Empty(EmptyState),
}

/// One recipe row in the results table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub title: String,
    pub cuisine: String,
    pub rating: String,
    pub total_time: String,

    /// Whether the cursor is on this row.
    pub is_selected: bool,

    /// Whether this recipe is the one shown in the detail drawer.
    pub is_open: bool,

    /// Character ranges of `title` matching the title filter, `(start, end)` exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Page title block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub subtitle: String,
}

/// Filter panel state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPanelInfo {
    /// Whether the panel is open for editing.
    pub editing: bool,

    /// While editing: every configured field with its draft value.
    /// Otherwise: only the applied (non-empty) filters.
    pub fields: Vec<FilterFieldInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterFieldInfo {
    pub name: String,
    pub value: String,
    pub is_focused: bool,
}

/// Error banner text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerInfo {
    pub message: String,
}

/// A slot in the pagination strip: a page number or a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(u32),
    Gap,
}

/// Pagination strip and result summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    pub current_page: u32,
    pub total_pages: u32,
    pub slots: Vec<PageSlot>,
    /// E.g. "Showing 16-30 of 52 recipes".
    pub summary: String,
    /// E.g. "15 per page".
    pub limit_label: String,
}

/// Detail drawer content for the selected recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    pub title: String,
    /// Label/value rows (cuisine, rating, times, serves).
    pub facts: Vec<(String, String)>,
    pub description: Option<String>,
    /// Nutrient name/amount rows.
    pub nutrients: Vec<(String, String)>,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}
