//! Host filesystem access from inside the Zellij sandbox.
//!
//! Zellij mounts the host under `/host`; paths from plugin configuration are
//! written from the user's point of view and need translating.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
