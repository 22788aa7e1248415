//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the query controller.
//!
//! ```text
//! Keys / API responses / timers → Event → handle_event → AppState mutations → Actions
//!                                               ↑                                ↓
//!                                               └──── RecipesFetched / Wake ─────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`filter_draft`]: Editable filter panel buffers
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input mode state machine
//! - [`state`]: Application state container and view model computation

pub mod actions;
pub mod filter_draft;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use filter_draft::FilterDraft;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::AppState;
