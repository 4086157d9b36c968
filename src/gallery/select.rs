use std::collections::HashSet;

use crate::color::Color;

use super::window::VisibleWindow;
use super::PaletteRecord;

/// Palettes with fewer distinct colors are not displayed.
pub const MIN_DISTINCT_COLORS: usize = 2;

/// Distinct colors shown per palette; the rest are dropped.
pub const MAX_SWATCHES: usize = 7;

/// A palette ready for display at a given position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderable {
    pub index: usize,
    pub colors: Vec<Color>,
}

/// Distinct colors in order of first appearance.
pub fn dedupe(colors: &[Color]) -> Vec<Color> {
    let mut seen = HashSet::with_capacity(colors.len());
    colors
        .iter()
        .copied()
        .filter(|color| seen.insert(*color))
        .collect()
}

/// Reduce one record for display, or `None` when it is degenerate.
pub fn select_renderable(index: usize, record: &PaletteRecord) -> Option<Renderable> {
    let mut colors = dedupe(&record.colors);
    if colors.len() < MIN_DISTINCT_COLORS {
        return None;
    }
    colors.truncate(MAX_SWATCHES);
    Some(Renderable { index, colors })
}

/// Reduce only the records inside `window`.
pub fn select_window(records: &[PaletteRecord], window: VisibleWindow) -> Vec<Renderable> {
    let end = window.end.min(records.len());
    let start = window.start.min(end);

    records[start..end]
        .iter()
        .enumerate()
        .filter_map(|(offset, record)| select_renderable(start + offset, record))
        .collect()
}
