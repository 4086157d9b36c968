use crate::error::GalleryError;

use super::loader::{FetchRequest, FetchState, IncrementalLoader};
use super::select::{select_window, Renderable};
use super::window::{compute_visible_window, content_extent, VisibleWindow, ROW_EXTENT};
use super::Page;

/// Terminal-independent state of one gallery screen.
///
/// Scroll offset and viewport are measured in lines; each record takes
/// [`ROW_EXTENT`] lines.
#[derive(Debug, Default)]
pub struct GalleryView {
    loader: IncrementalLoader,
    scroll_offset: usize,
    viewport_extent: usize,
    /// Set after a failed fetch; visibility is not delivered until the user acts.
    paused: bool,
}

impl GalleryView {
    pub fn new(viewport_extent: usize) -> Self {
        Self {
            viewport_extent,
            ..Self::default()
        }
    }

    pub fn loader(&self) -> &IncrementalLoader {
        &self.loader
    }

    pub fn state(&self) -> FetchState {
        self.loader.state()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn viewport_extent(&self) -> usize {
        self.viewport_extent
    }

    pub fn start(&mut self) -> Option<FetchRequest> {
        self.loader.start()
    }

    pub fn resize(&mut self, viewport_extent: usize) {
        self.viewport_extent = viewport_extent;
        self.clamp_scroll();
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
        self.clamp_scroll();
        self.resume();
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
        self.resume();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll();
        self.resume();
    }

    /// Page down/up by one viewport.
    pub fn page(&mut self, forward: bool) {
        let step = self.viewport_extent.max(1) as isize;
        self.scroll_by(if forward { step } else { -step });
    }

    /// Explicit retry after a failure. Restarts the initial load if it never succeeded.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        self.resume();
        self.loader.start().or_else(|| self.refresh())
    }

    pub fn window(&self) -> VisibleWindow {
        compute_visible_window(
            self.scroll_offset,
            self.viewport_extent,
            ROW_EXTENT,
            self.loader.records().len(),
        )
    }

    /// Position of the last record when it is materialized in the window.
    pub fn sentinel(&self) -> Option<usize> {
        let last = self.loader.records().len().checked_sub(1)?;
        self.window().contains(last).then_some(last)
    }

    /// Re-sync the sentinel watch with the current window and report its
    /// visibility. Returns the next page to fetch, if any.
    pub fn refresh(&mut self) -> Option<FetchRequest> {
        let sentinel = self.sentinel();
        self.loader.sync_sentinel(sentinel);

        if self.paused {
            return None;
        }
        let watched = self.loader.watched_sentinel()?;
        let intersecting = self.window().contains(watched);
        self.loader.on_visibility(watched, intersecting)
    }

    pub fn complete(&mut self, result: Result<Page, GalleryError>) {
        let failed = result.is_err();
        if self.loader.complete(result) {
            self.paused = failed;
        }
    }

    /// Displayable palettes for the current window only.
    pub fn renderables(&self) -> Vec<Renderable> {
        select_window(self.loader.records(), self.window())
    }

    pub fn show_initial_loader(&self) -> bool {
        self.loader.state().initial_loading
    }

    pub fn show_next_loader(&self) -> bool {
        let state = self.loader.state();
        state.has_more || state.fetching_next
    }

    pub fn error(&self) -> Option<&str> {
        self.loader.last_error()
    }

    fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.loader.clear_error();
        }
    }

    fn max_scroll(&self) -> usize {
        content_extent(ROW_EXTENT, self.loader.records().len()).saturating_sub(self.viewport_extent)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }
}
