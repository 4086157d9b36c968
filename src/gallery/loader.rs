//! Viewport-driven page loading.
//!
//! The loader owns the accumulated records and the fetch flags. It never
//! performs I/O itself: it hands out a [`FetchRequest`] when a page should be
//! loaded and expects the caller to report the outcome through
//! [`IncrementalLoader::complete`]. Only one request is ever outstanding.

use tracing::{debug, warn};

use crate::error::GalleryError;

use super::{Cursor, Page, PaletteRecord};

/// Whether something is loading and whether more pages exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchState {
    pub initial_loading: bool,
    pub fetching_next: bool,
    pub has_more: bool,
}

impl FetchState {
    pub fn in_flight(&self) -> bool {
        self.initial_loading || self.fetching_next
    }
}

/// A page the caller must fetch and report back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub cursor: Cursor,
}

/// Visibility watch on the sentinel position. Released by [`SentinelWatch::disconnect`].
#[derive(Debug)]
struct SentinelWatch {
    sentinel: usize,
}

impl SentinelWatch {
    fn observe(sentinel: usize) -> Self {
        debug!(sentinel, "observing sentinel");
        Self { sentinel }
    }

    fn disconnect(self) {
        debug!(sentinel = self.sentinel, "sentinel watch disconnected");
    }
}

#[derive(Debug)]
pub struct IncrementalLoader {
    state: FetchState,
    records: Vec<PaletteRecord>,
    next_cursor: Cursor,
    watch: Option<SentinelWatch>,
    synced: Option<(Option<usize>, FetchState)>,
    last_error: Option<String>,
    pages_loaded: usize,
}

impl Default for IncrementalLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl IncrementalLoader {
    pub fn new() -> Self {
        Self {
            state: FetchState::default(),
            records: Vec::new(),
            next_cursor: Cursor::first(),
            watch: None,
            synced: None,
            last_error: None,
            pages_loaded: 0,
        }
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    /// Every record fetched so far, oldest page first.
    pub fn records(&self) -> &[PaletteRecord] {
        &self.records
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    /// Position currently watched for visibility, if any.
    pub fn watched_sentinel(&self) -> Option<usize> {
        self.watch.as_ref().map(|w| w.sentinel)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Issue the initial load. Returns `None` once anything has been requested.
    pub fn start(&mut self) -> Option<FetchRequest> {
        if self.state.in_flight() || self.pages_loaded > 0 {
            return None;
        }
        self.state.initial_loading = true;
        debug!(cursor = %self.next_cursor, "initial load");
        Some(FetchRequest {
            cursor: self.next_cursor,
        })
    }

    /// Watch `sentinel` for visibility, replacing any earlier watch.
    ///
    /// `None` means no sentinel is rendered: the old watch is released and
    /// nothing new is observed. While a fetch is in flight this does nothing.
    pub fn attach_sentinel(&mut self, sentinel: Option<usize>) {
        if self.state.fetching_next {
            return;
        }

        if let Some(previous) = self.watch.take() {
            previous.disconnect();
        }

        self.watch = sentinel.map(SentinelWatch::observe);
    }

    /// Re-run [`attach_sentinel`](Self::attach_sentinel) when the sentinel or
    /// the fetch flags changed since the last call.
    pub fn sync_sentinel(&mut self, sentinel: Option<usize>) {
        let key = (sentinel, self.state);
        if self.synced == Some(key) {
            return;
        }
        self.synced = Some(key);
        self.attach_sentinel(sentinel);
    }

    /// Visibility callback for the watched sentinel.
    pub fn on_visibility(&mut self, sentinel: usize, intersecting: bool) -> Option<FetchRequest> {
        if self.watched_sentinel() != Some(sentinel) {
            return None;
        }
        if !intersecting || !self.state.has_more || self.state.in_flight() {
            return None;
        }

        self.state.fetching_next = true;
        debug!(cursor = %self.next_cursor, sentinel, "sentinel visible, fetching next page");
        Some(FetchRequest {
            cursor: self.next_cursor,
        })
    }

    /// Apply the outcome of the outstanding fetch. Returns `false` when no
    /// fetch was in flight and the result was dropped.
    pub fn complete(&mut self, result: Result<Page, GalleryError>) -> bool {
        if !self.state.in_flight() {
            warn!("fetch completion received with no fetch in flight, ignoring");
            return false;
        }
        self.state.initial_loading = false;
        self.state.fetching_next = false;

        match result {
            Ok(page) => {
                debug!(
                    cursor = %self.next_cursor,
                    items = page.items.len(),
                    has_more = page.has_more,
                    "page loaded"
                );
                self.records.extend(page.items);
                self.state.has_more = page.has_more;
                self.next_cursor = self.next_cursor.next();
                self.pages_loaded += 1;
                self.last_error = None;
            }
            Err(err) => {
                warn!(cursor = %self.next_cursor, "page fetch failed: {err}");
                self.last_error = Some(err.to_string());
            }
        }
        true
    }
}

impl Drop for IncrementalLoader {
    fn drop(&mut self) {
        if let Some(watch) = self.watch.take() {
            watch.disconnect();
        }
    }
}
