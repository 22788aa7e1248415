//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where application state changes. It
//! translates discrete events (keys already mapped by the plugin shim, API
//! responses and timer wake-ups) into query controller calls and UI state
//! updates, and returns the side effects the shim must perform.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `SelectRecipe`, `CloseDetail`,
//!   `ClearSelection`
//! - **Filter panel**: `EditFilters`, `Char`, `Backspace`, `NextField`,
//!   `PrevField`, `SubmitFilters`, `CancelFilters`, `ClearFilters`
//! - **Pagination**: `NextPage`, `PrevPage`, `FirstPage`, `LastPage`,
//!   `IncreaseLimit`, `DecreaseLimit`
//! - **Lifecycle**: `Start`, `AccessDenied`, `Retry`, `CloseFocus`
//! - **Host**: `RecipesFetched`, `Wake`
//!
//! The return value pairs a "should render" flag with the actions to run.

use crate::app::modes::InputMode;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::query::{FetchOutcome, FetchTicket, Release, Settle};
use std::time::Instant;

/// Events produced by the plugin shim.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Permissions are in place; issue the initial fetch.
    Start,
    /// The host refused network access; nothing can be fetched.
    AccessDenied,

    /// Moves the cursor down (wraps).
    KeyDown,
    /// Moves the cursor up (wraps).
    KeyUp,
    /// Opens the detail drawer on the recipe under the cursor.
    SelectRecipe,
    /// Closes the detail drawer, keeping the selection.
    CloseDetail,
    /// Forgets the selected recipe.
    ClearSelection,
    /// Hides the plugin pane.
    CloseFocus,

    /// Opens the filter panel for editing.
    EditFilters,
    /// Types a character into the focused filter field.
    Char(char),
    /// Deletes the last character of the focused filter field.
    Backspace,
    NextField,
    PrevField,
    /// Applies the draft as the new filter set.
    SubmitFilters,
    /// Closes the filter panel without applying the draft.
    CancelFilters,
    /// Clears all filters immediately.
    ClearFilters,

    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    /// Switches to the next larger configured page size.
    IncreaseLimit,
    /// Switches to the next smaller configured page size.
    DecreaseLimit,

    /// Re-issues the fetch for the current query.
    Retry,

    /// A recipe API call completed.
    RecipesFetched {
        /// Generation the request was issued under.
        generation: u64,
        result: FetchOutcome,
    },

    /// A timer scheduled via [`Action::ScheduleWake`] fired.
    Wake,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// `now` is the time the event is handled at; it drives the loading floor.
///
/// # Errors
///
/// Returns an error if a page or page size outside the allowed range is
/// requested. State is left unchanged in that case.
///
/// # Example
///
/// ```
/// use recipe_browser::{handle_event, initialize, Action, Config, Event};
/// use std::time::Instant;
///
/// let mut state = initialize(&Config::default());
/// let (_render, actions) = handle_event(&mut state, &Event::Start, Instant::now())?;
/// assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
/// # Ok::<(), recipe_browser::RecipeBrowserError>(())
/// ```
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event, now: Instant) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = %event_name(event)).entered();

    match event {
        Event::Start => {
            let ticket = state.controller.start(now);
            Ok((true, vec![Action::Fetch(ticket)]))
        }
        Event::AccessDenied => {
            state.controller.abandon();
            Ok((true, vec![]))
        }
        Event::KeyDown => {
            state.move_cursor_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_cursor_up();
            Ok((true, vec![]))
        }
        Event::SelectRecipe => {
            let Some(recipe) = state.cursor_recipe().cloned() else {
                tracing::debug!("no recipe under cursor");
                return Ok((false, vec![]));
            };
            state.controller.select(recipe);
            Ok((true, vec![]))
        }
        Event::CloseDetail => {
            if !state.controller.selection().is_open() {
                return Ok((false, vec![]));
            }
            state.controller.close_detail();
            Ok((true, vec![]))
        }
        Event::ClearSelection => {
            if state.controller.selection().recipe().is_none() {
                return Ok((false, vec![]));
            }
            state.controller.clear_selection();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::EditFilters => {
            tracing::debug!("opening filter panel");
            state.begin_filter_edit();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::EditingFilters {
                return Ok((false, vec![]));
            }
            state.draft.push(*c);
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::EditingFilters {
                return Ok((false, vec![]));
            }
            state.draft.pop();
            Ok((true, vec![]))
        }
        Event::NextField => {
            state.draft.focus_next();
            Ok((true, vec![]))
        }
        Event::PrevField => {
            state.draft.focus_prev();
            Ok((true, vec![]))
        }
        Event::SubmitFilters => {
            if state.input_mode != InputMode::EditingFilters {
                return Ok((false, vec![]));
            }
            let filters = state.draft.to_filter_set();
            state.end_filter_edit();
            tracing::debug!(active_filters = filters.active_count(), "filters submitted");
            Ok((true, fetch(state.controller.set_filters(filters, now))))
        }
        Event::CancelFilters => {
            tracing::debug!("filter edit cancelled");
            state.end_filter_edit();
            Ok((true, vec![]))
        }
        Event::ClearFilters => {
            state.end_filter_edit();
            Ok((true, fetch(state.controller.clear_filters(now))))
        }

        Event::NextPage => {
            let current = state.controller.page_request().page;
            match state.controller.known_total_pages() {
                Some(total) if current < total => {
                    Ok((true, fetch(state.controller.set_page(current + 1, now)?)))
                }
                _ => Ok((false, vec![])),
            }
        }
        Event::PrevPage => {
            let current = state.controller.page_request().page;
            if current <= 1 {
                return Ok((false, vec![]));
            }
            Ok((true, fetch(state.controller.set_page(current - 1, now)?)))
        }
        Event::FirstPage => Ok((true, fetch(state.controller.set_page(1, now)?))),
        Event::LastPage => match state.controller.known_total_pages() {
            Some(total) if total > 0 => Ok((true, fetch(state.controller.set_page(total, now)?))),
            _ => Ok((false, vec![])),
        },
        Event::IncreaseLimit | Event::DecreaseLimit => {
            let larger = matches!(event, Event::IncreaseLimit);
            let Some(limit) = state.adjacent_page_size(larger) else {
                tracing::debug!(larger = larger, "no further page size available");
                return Ok((false, vec![]));
            };
            Ok((true, fetch(state.controller.set_limit(limit, now)?)))
        }

        Event::Retry => {
            let ticket = state.controller.refresh(now);
            Ok((true, vec![Action::Fetch(ticket)]))
        }

        Event::RecipesFetched { generation, result } => {
            match state.controller.settle(*generation, result.clone(), now) {
                Settle::Committed => {
                    state.reset_cursor();
                    Ok((true, vec![]))
                }
                Settle::Deferred(wait) => Ok((false, vec![Action::ScheduleWake(wait)])),
                Settle::Discarded => Ok((false, vec![])),
            }
        }
        Event::Wake => match state.controller.release_due(now) {
            Release::Committed => {
                state.reset_cursor();
                Ok((true, vec![]))
            }
            Release::Waiting(wait) => Ok((false, vec![Action::ScheduleWake(wait)])),
            Release::Nothing => Ok((false, vec![])),
        },
    }
}

fn fetch(ticket: Option<FetchTicket>) -> Vec<Action> {
    ticket.map(Action::Fetch).into_iter().collect()
}

/// Short event name for spans; avoids dumping whole result pages into traces.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Start => "Start",
        Event::AccessDenied => "AccessDenied",
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::SelectRecipe => "SelectRecipe",
        Event::CloseDetail => "CloseDetail",
        Event::ClearSelection => "ClearSelection",
        Event::CloseFocus => "CloseFocus",
        Event::EditFilters => "EditFilters",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::NextField => "NextField",
        Event::PrevField => "PrevField",
        Event::SubmitFilters => "SubmitFilters",
        Event::CancelFilters => "CancelFilters",
        Event::ClearFilters => "ClearFilters",
        Event::NextPage => "NextPage",
        Event::PrevPage => "PrevPage",
        Event::FirstPage => "FirstPage",
        Event::LastPage => "LastPage",
        Event::IncreaseLimit => "IncreaseLimit",
        Event::DecreaseLimit => "DecreaseLimit",
        Event::Retry => "Retry",
        Event::RecipesFetched { .. } => "RecipesFetched",
        Event::Wake => "Wake",
    }
}
