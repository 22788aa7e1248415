//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Renderable UI state
//! - [`renderer`]: Top-level rendering entry point
//! - [`components`]: Per-region renderers
//! - [`pagination`]: Page window computation for the pagination strip
//! - [`helpers`]: Width-aware text utilities and highlighting
//! - [`theme`]: Color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod pagination;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    BannerInfo, DetailInfo, DisplayItem, EmptyState, FilterFieldInfo, FilterPanelInfo, FooterInfo,
    HeaderInfo, PageSlot, PaginationInfo, ResultsView, UIViewModel,
};
