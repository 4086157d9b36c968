//! Palette gallery: a paginated colors backend, an incremental loader that
//! fetches the next page when the last palette scrolls into view, and a
//! terminal front end that renders only the visible window.

pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod feedback;
pub mod gallery;
pub mod server;
pub mod tui;
