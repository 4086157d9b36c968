//! Incremental palette gallery.
//!
//! Pages of palettes come from a [`source::PageSource`], accumulate inside an
//! [`loader::IncrementalLoader`] and are reduced for display by
//! [`select`] only for the positions inside the current
//! [`window::VisibleWindow`]. [`view::GalleryView`] ties the pieces together
//! without any terminal dependency so the TUI stays a thin renderer.

pub mod loader;
pub mod select;
pub mod source;
pub mod view;
pub mod window;

use crate::color::Color;

/// One item's colors, in fetch order. Identified only by its position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaletteRecord {
    pub colors: Vec<Color>,
}

impl PaletteRecord {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }
}

impl From<Vec<Color>> for PaletteRecord {
    fn from(colors: Vec<Color>) -> Self {
        Self { colors }
    }
}

/// A batch of records plus whether a following page exists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub items: Vec<PaletteRecord>,
    pub has_more: bool,
}

/// Opaque position of a page in the backend.
///
/// The bundled sources treat it as a 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cursor(u32);

impl Cursor {
    pub fn first() -> Self {
        Self(1)
    }

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn page_number(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "page {}", self.0)
    }
}
