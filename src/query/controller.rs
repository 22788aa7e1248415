//! The query controller: single source of truth for what is being viewed.
//!
//! [`QueryController`] owns the filter set, the page request, the load state and
//! the selection. Every change to `(filters, page, limit)` starts a new fetch
//! cycle and returns a [`FetchTicket`] for the caller to dispatch. When the
//! response comes back it is handed to [`QueryController::settle`] together with
//! the generation it was issued under.
//!
//! # Last request wins
//!
//! Each ticket carries a generation number taken from a counter that is bumped
//! on every trigger. A response (or a deferred commit) is only applied when its
//! generation is still the current one, so a slow, superseded request can never
//! overwrite the state produced by a newer one.
//!
//! # Latency floor
//!
//! Responses that arrive sooner than `min_loading` after their fetch started
//! are parked instead of committed, and [`Settle::Deferred`] tells the caller
//! how long to wait before calling [`QueryController::release_due`]. Success
//! and failure are delayed alike. A zero floor disables the behavior.
//!
//! All timing goes through explicit `Instant` arguments.
//!
//! # Example
//!
//! ```
//! use recipe_browser::query::{QueryController, Settle};
//! use recipe_browser::{FilterSet, ResultPage};
//! use std::time::{Duration, Instant};
//!
//! let mut controller = QueryController::new(15, Duration::ZERO)?;
//! let t0 = Instant::now();
//! let ticket = controller.start(t0);
//!
//! let page = ResultPage { items: vec![], total_pages: 0, total_count: 0 };
//! assert_eq!(controller.settle(ticket.generation, Ok(page), t0), Settle::Committed);
//!
//! let next = controller.set_filters(FilterSet::new().with("cuisine", "thai"), t0);
//! assert!(next.is_some());
//! # Ok::<(), recipe_browser::RecipeBrowserError>(())
//! ```

use super::load_state::{EmptyResult, LoadState, Selection, LOAD_FAILURE_MESSAGE};
use crate::domain::{ApiError, FilterSet, PageRequest, Recipe, Result, ResultPage};
use std::time::{Duration, Instant};

/// Default minimum time the loading indicator stays visible.
pub const DEFAULT_MIN_LOADING: Duration = Duration::from_millis(300);

/// Result of a single recipe API call as seen by the controller.
pub type FetchOutcome = std::result::Result<ResultPage, ApiError>;

/// Snapshot of the `(filters, page, limit)` triple a fetch was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeQuery {
    pub filters: FilterSet,
    pub page: PageRequest,
}

/// A fetch the caller must dispatch to the recipe API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Generation token; hand it back to [`QueryController::settle`].
    pub generation: u64,
    pub query: RecipeQuery,
}

/// What [`QueryController::settle`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// The load state now reflects the response.
    Committed,
    /// The response is parked until the latency floor elapses.
    Deferred(Duration),
    /// The response belonged to a superseded (or already settled) request.
    Discarded,
}

/// What [`QueryController::release_due`] did with a parked response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// The parked response was committed.
    Committed,
    /// A parked response exists but is not due yet.
    Waiting(Duration),
    /// Nothing was parked.
    Nothing,
}

#[derive(Debug)]
struct InFlight {
    generation: u64,
    started_at: Instant,
}

#[derive(Debug)]
struct Parked {
    generation: u64,
    outcome: FetchOutcome,
    due: Instant,
}

/// Owns all page state and sequences fetches so only the latest one lands.
#[derive(Debug)]
pub struct QueryController {
    filters: FilterSet,
    page: PageRequest,
    load_state: LoadState,
    /// Last successfully loaded page, kept while a refetch is outstanding.
    previous: Option<ResultPage>,
    /// Query the most recent successful page was fetched for.
    loaded_query: Option<RecipeQuery>,
    selection: Selection,
    generation: u64,
    in_flight: Option<InFlight>,
    parked: Option<Parked>,
    min_loading: Duration,
}

impl Default for QueryController {
    /// Page size [`DEFAULT_PAGE_SIZE`](crate::domain::DEFAULT_PAGE_SIZE) with the default loading floor.
    fn default() -> Self {
        Self::with_page(PageRequest::default(), DEFAULT_MIN_LOADING)
    }
}

impl QueryController {
    /// Creates an idle controller with no filters, on page 1.
    ///
    /// # Errors
    ///
    /// Returns an error if `limit` is zero.
    pub fn new(limit: u32, min_loading: Duration) -> Result<Self> {
        Ok(Self::with_page(PageRequest::first(limit)?, min_loading))
    }

    fn with_page(page: PageRequest, min_loading: Duration) -> Self {
        Self {
            filters: FilterSet::new(),
            page,
            load_state: LoadState::Idle,
            previous: None,
            loaded_query: None,
            selection: Selection::default(),
            generation: 0,
            in_flight: None,
            parked: None,
            min_loading,
        }
    }

    /// Issues the initial fetch for the current triple.
    pub fn start(&mut self, now: Instant) -> FetchTicket {
        tracing::debug!("starting initial recipe fetch");
        self.trigger(now)
    }

    /// Re-issues a fetch for the current triple even though nothing changed.
    pub fn refresh(&mut self, now: Instant) -> FetchTicket {
        tracing::debug!(generation = self.generation, "refresh requested");
        self.trigger(now)
    }

    /// Replaces the filter set wholesale and returns to page 1.
    ///
    /// Returns `None` if neither the filters nor the page actually changed.
    pub fn set_filters(&mut self, filters: FilterSet, now: Instant) -> Option<FetchTicket> {
        if filters == self.filters && self.page.page == 1 {
            tracing::debug!("filters unchanged on first page, skipping fetch");
            return None;
        }

        tracing::debug!(
            active_filters = filters.active_count(),
            previous_page = self.page.page,
            "filters replaced, resetting to page 1"
        );
        self.filters = filters;
        self.page.page = 1;
        Some(self.trigger(now))
    }

    /// Same as `set_filters` with an empty filter set.
    pub fn clear_filters(&mut self, now: Instant) -> Option<FetchTicket> {
        self.set_filters(FilterSet::new(), now)
    }

    /// Moves to another page, leaving filters and limit alone.
    ///
    /// # Errors
    ///
    /// Returns an error if `page` is zero; state is left untouched.
    pub fn set_page(&mut self, page: u32, now: Instant) -> Result<Option<FetchTicket>> {
        let request = PageRequest::new(page, self.page.limit)?;
        if request == self.page {
            return Ok(None);
        }

        tracing::debug!(from = self.page.page, to = page, "page changed");
        self.page = request;
        Ok(Some(self.trigger(now)))
    }

    /// Changes the page size and returns to page 1.
    ///
    /// # Errors
    ///
    /// Returns an error if `limit` is zero; state is left untouched.
    pub fn set_limit(&mut self, limit: u32, now: Instant) -> Result<Option<FetchTicket>> {
        let request = PageRequest::first(limit)?;
        if request == self.page {
            return Ok(None);
        }

        tracing::debug!(from = self.page.limit, to = limit, "page size changed, resetting to page 1");
        self.page = request;
        Ok(Some(self.trigger(now)))
    }

    /// Opens the detail drawer on `recipe`, replacing any earlier selection.
    pub fn select(&mut self, recipe: Recipe) {
        tracing::debug!(recipe_id = %recipe.id_label(), "recipe selected");
        self.selection.replace(recipe);
    }

    /// Closes the detail drawer but remembers the recipe.
    pub fn close_detail(&mut self) {
        self.selection.close();
    }

    /// Forgets the selected recipe and closes the drawer.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Gives up on fetching without issuing a request, e.g. when the host
    /// refuses network access. Any outstanding fetch is superseded.
    pub fn abandon(&mut self) {
        self.generation += 1;
        self.in_flight = None;
        self.parked = None;
        tracing::warn!(generation = self.generation, "recipe fetching unavailable");
        self.load_state = LoadState::Failed(LOAD_FAILURE_MESSAGE.to_string());
    }

    /// Applies a response for the fetch issued under `generation`.
    ///
    /// Superseded generations are discarded. A response that arrives before the
    /// latency floor has elapsed is parked and [`Settle::Deferred`] carries the
    /// remaining wait.
    pub fn settle(&mut self, generation: u64, outcome: FetchOutcome, now: Instant) -> Settle {
        let _span = tracing::debug_span!(
            "settle_fetch",
            generation = generation,
            current_generation = self.generation,
            success = outcome.is_ok()
        )
        .entered();

        let started_at = match &self.in_flight {
            Some(in_flight) if in_flight.generation == generation => in_flight.started_at,
            _ => {
                tracing::debug!("discarding superseded response");
                return Settle::Discarded;
            }
        };
        self.in_flight = None;

        let due = started_at + self.min_loading;
        if now < due {
            let wait = due - now;
            tracing::debug!(wait_ms = wait.as_millis(), "response arrived early, parking until latency floor");
            self.parked = Some(Parked {
                generation,
                outcome,
                due,
            });
            return Settle::Deferred(wait);
        }

        self.commit(outcome);
        Settle::Committed
    }

    /// Commits a parked response once its latency floor has elapsed.
    pub fn release_due(&mut self, now: Instant) -> Release {
        let Some(parked) = self.parked.take() else {
            return Release::Nothing;
        };

        if parked.generation != self.generation {
            tracing::debug!(generation = parked.generation, "dropping parked response from superseded generation");
            return Release::Nothing;
        }

        if now < parked.due {
            let wait = parked.due - now;
            self.parked = Some(parked);
            return Release::Waiting(wait);
        }

        tracing::debug!(generation = parked.generation, "releasing parked response");
        self.commit(parked.outcome);
        Release::Committed
    }

    /// Current filter set.
    #[must_use]
    pub const fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Current page and page size.
    #[must_use]
    pub const fn page_request(&self) -> PageRequest {
        self.page
    }

    #[must_use]
    pub const fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Generation of the most recently issued fetch (0 before the first one).
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.load_state.is_loading()
    }

    /// The last good page while a refetch is outstanding.
    ///
    /// Only exposed during `Loading`; a failed fetch never shows old data.
    #[must_use]
    pub fn stale_page(&self) -> Option<&ResultPage> {
        if self.load_state.is_loading() {
            self.previous.as_ref()
        } else {
            None
        }
    }

    /// Total page count for the current filters and page size, for bounding pagination.
    ///
    /// While loading, the previous page only counts if it was fetched with the
    /// same filters and limit; a page from another query says nothing about
    /// how many pages this one has.
    #[must_use]
    pub fn known_total_pages(&self) -> Option<u32> {
        if let Some(page) = self.load_state.page() {
            return Some(page.total_pages);
        }
        let previous = self.previous.as_ref()?;
        let query = self.loaded_query.as_ref()?;
        (query.filters == self.filters && query.page.limit == self.page.limit).then_some(previous.total_pages)
    }

    /// True iff the latest fetch succeeded with at least one recipe.
    #[must_use]
    pub fn has_results(&self) -> bool {
        self.load_state.page().is_some_and(|page| !page.is_empty())
    }

    /// True iff some filter field has a non-empty value.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.filters.has_active()
    }

    /// Which empty state applies, if the latest fetch succeeded with no recipes.
    #[must_use]
    pub fn empty_result(&self) -> Option<EmptyResult> {
        match &self.load_state {
            LoadState::Loaded(page) if page.is_empty() => Some(if self.has_active_filters() {
                EmptyResult::Search
            } else {
                EmptyResult::NoData
            }),
            _ => None,
        }
    }

    /// Starts a new fetch cycle for the current triple.
    fn trigger(&mut self, now: Instant) -> FetchTicket {
        self.generation += 1;
        self.parked = None;

        if let LoadState::Loaded(page) = std::mem::replace(&mut self.load_state, LoadState::Loading) {
            self.previous = Some(page);
        }
        self.in_flight = Some(InFlight {
            generation: self.generation,
            started_at: now,
        });

        tracing::debug!(
            generation = self.generation,
            page = self.page.page,
            limit = self.page.limit,
            active_filters = self.filters.active_count(),
            "recipe fetch triggered"
        );

        FetchTicket {
            generation: self.generation,
            query: RecipeQuery {
                filters: self.filters.clone(),
                page: self.page,
            },
        }
    }

    fn commit(&mut self, outcome: FetchOutcome) {
        match outcome {
            Ok(page) => {
                tracing::debug!(
                    item_count = page.items.len(),
                    total_pages = page.total_pages,
                    total_count = page.total_count,
                    "recipes loaded"
                );
                self.previous = None;
                self.loaded_query = Some(RecipeQuery {
                    filters: self.filters.clone(),
                    page: self.page,
                });
                self.load_state = LoadState::Loaded(page);
            }
            Err(error) => {
                tracing::error!(error = %error, "failed to load recipes");
                self.load_state = LoadState::Failed(LOAD_FAILURE_MESSAGE.to_string());
            }
        }
    }
}
