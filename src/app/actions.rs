//! Side effects requested by the event handler.
//!
//! The handler never talks to Zellij directly. It returns a `Vec<Action>` and
//! the plugin shim executes them in order.

use crate::query::FetchTicket;
use std::time::Duration;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends the ticket's request to the recipe API.
    ///
    /// The ticket's generation must come back with the response so the
    /// controller can discard it if it has been superseded.
    Fetch(FetchTicket),

    /// Asks for a timer event after the given delay.
    ///
    /// Used to release a response held back by the loading floor.
    ScheduleWake(Duration),
}
