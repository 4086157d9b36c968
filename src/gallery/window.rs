/// Estimated terminal lines taken by one palette row.
pub const ROW_EXTENT: usize = 3;

/// Rows materialized beyond each edge of the viewport.
pub const OVERSCAN: usize = 1;

/// Half-open range of record positions eligible for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleWindow {
    pub start: usize,
    pub end: usize,
}

impl VisibleWindow {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Derive the window from the scroll position.
///
/// `scroll_offset` and `viewport_extent` use the same unit as `item_extent`.
/// The result is widened by [`OVERSCAN`] rows on each side and clamped to
/// `0..total_count`.
pub fn compute_visible_window(
    scroll_offset: usize,
    viewport_extent: usize,
    item_extent: usize,
    total_count: usize,
) -> VisibleWindow {
    if total_count == 0 || item_extent == 0 {
        return VisibleWindow::empty();
    }

    let first = scroll_offset / item_extent;
    let last_exclusive = scroll_offset
        .saturating_add(viewport_extent)
        .div_ceil(item_extent)
        .max(first + 1);

    let start = first.saturating_sub(OVERSCAN).min(total_count);
    let end = last_exclusive.saturating_add(OVERSCAN).min(total_count);

    VisibleWindow { start, end }
}

/// Total extent of `total_count` rows.
pub fn content_extent(item_extent: usize, total_count: usize) -> usize {
    item_extent.saturating_mul(total_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_has_empty_window() {
        assert!(compute_visible_window(0, 30, ROW_EXTENT, 0).is_empty());
    }

    #[test]
    fn zero_extent_has_empty_window() {
        assert!(compute_visible_window(0, 30, 0, 10).is_empty());
    }

    #[test]
    fn top_of_list_includes_trailing_overscan() {
        // 10 lines show rows 0..4 (row 3 partially), plus one overscan row.
        let window = compute_visible_window(0, 10, 3, 100);
        assert_eq!(window, VisibleWindow { start: 0, end: 5 });
    }

    #[test]
    fn scrolled_window_includes_leading_overscan() {
        let window = compute_visible_window(30, 9, 3, 100);
        assert_eq!(window, VisibleWindow { start: 9, end: 14 });
    }

    #[test]
    fn window_is_clamped_to_collection() {
        let window = compute_visible_window(0, 100, 3, 4);
        assert_eq!(window, VisibleWindow { start: 0, end: 4 });
    }

    #[test]
    fn offset_past_end_is_clamped() {
        let window = compute_visible_window(1_000, 10, 3, 4);
        assert_eq!(window.end, 4);
        assert!(window.start <= window.end);
    }

    #[test]
    fn window_size_scales_with_viewport_not_collection() {
        let small = compute_visible_window(300, 12, 3, 1_000);
        let large = compute_visible_window(300, 12, 3, 1_000_000);
        assert_eq!(small, large);
        assert_eq!(small.len(), 6);
    }

    #[test]
    fn contains_is_half_open() {
        let window = VisibleWindow { start: 2, end: 5 };
        assert!(!window.contains(1));
        assert!(window.contains(2));
        assert!(window.contains(4));
        assert!(!window.contains(5));
    }
}
