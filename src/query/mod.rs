//! Query orchestration: filters, pagination and fetch sequencing.
//!
//! - [`controller`]: [`QueryController`] and the fetch ticket / settle protocol
//! - [`load_state`]: [`LoadState`], [`Selection`] and the empty-result kinds

pub mod controller;
pub mod load_state;

pub use controller::{
    FetchOutcome, FetchTicket, QueryController, RecipeQuery, Release, Settle, DEFAULT_MIN_LOADING,
};
pub use load_state::{EmptyResult, LoadState, Selection, LOAD_FAILURE_MESSAGE};
