//! Incremental list controller for the browse grids.
//!
//! Owns the paged fetch state for a filterable, infinitely-scrolling
//! collection: accumulated items, current/total page counters, the
//! active genre filter, and the loading flags. The controller performs
//! no I/O itself: transitions return a [`PageRequest`] describing the
//! fetch to spawn, and completions come back through [`apply_page`].
//!
//! Two guards make this correct without locks or cancellation:
//!
//! - **Filter epoch**: every filter change bumps an epoch counter and
//!   the request carries it; a completion whose epoch no longer matches
//!   is discarded, so a stale fetch can never populate a newer filter's
//!   grid.
//! - **Single in-flight load-more**: the near-end signal is
//!   level-triggered (it fires on every navigation while the cursor
//!   sits near the grid's end), so re-entrant calls while a load is in
//!   flight are dropped, not queued.
//!
//! [`apply_page`]: BrowseController::apply_page

use crate::catalog::{CatalogError, CatalogItem, GenreFilter, MediaType, Page};

/// A fetch the controller wants performed.
///
/// Carries everything needed to issue the request and to validate the
/// completion against the state that requested it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub epoch: u64,
    pub media: MediaType,
    pub page: u32,
    pub filter: GenreFilter,
}

/// Read-only view of the grid state for rendering.
pub struct BrowseView<'a> {
    pub items: &'a [CatalogItem],
    pub is_initial_loading: bool,
    pub is_loading_more: bool,
    /// Whether further pages exist (`current_page < total_pages`).
    pub has_more: bool,
    /// Retryable error from the most recent failed fetch, if any.
    pub error: Option<&'a str>,
    pub filter: GenreFilter,
}

/// Paged fetch state for one media type's grid.
#[derive(Debug)]
pub struct BrowseController {
    media: MediaType,
    items: Vec<CatalogItem>,
    current_page: u32,
    total_pages: u32,
    filter: GenreFilter,
    epoch: u64,
    is_initial_loading: bool,
    is_loading_more: bool,
    error: Option<String>,
}

impl BrowseController {
    /// A fresh controller with no items and no fetch issued yet.
    pub fn new(media: MediaType) -> Self {
        Self {
            media,
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            filter: GenreFilter::All,
            epoch: 0,
            is_initial_loading: false,
            is_loading_more: false,
            error: None,
        }
    }

    pub fn media(&self) -> MediaType {
        self.media
    }

    pub fn filter(&self) -> GenreFilter {
        self.filter
    }

    /// Whether no fetch has ever been issued (view entered for the
    /// first time).
    pub fn is_untouched(&self) -> bool {
        self.epoch == 0 && self.items.is_empty() && !self.is_initial_loading
    }

    /// Change the active filter and begin a fresh load.
    ///
    /// Resets pagination, clears the accumulated items, and bumps the
    /// epoch so any in-flight fetch from the previous filter is ignored
    /// when it resolves. Calling with the unchanged filter is a reload.
    pub fn set_filter(&mut self, filter: GenreFilter) -> PageRequest {
        self.filter = filter;
        self.items.clear();
        self.current_page = 1;
        self.total_pages = 1;
        self.is_initial_loading = true;
        self.is_loading_more = false;
        self.error = None;
        self.epoch += 1;
        PageRequest {
            epoch: self.epoch,
            media: self.media,
            page: 1,
            filter,
        }
    }

    /// Begin the first load (or a full reload) under the current filter.
    pub fn start(&mut self) -> PageRequest {
        self.set_filter(self.filter)
    }

    /// The cursor is near the end of the loaded grid.
    ///
    /// Returns the request for the next page, or `None` when a load is
    /// already in flight or every page is loaded. `current_page` itself
    /// only advances when the page applies successfully, so a failed
    /// page is retried by the next call rather than skipped.
    pub fn notify_near_end(&mut self) -> Option<PageRequest> {
        if self.is_initial_loading || self.is_loading_more {
            return None;
        }
        if self.current_page >= self.total_pages {
            return None;
        }
        self.is_loading_more = true;
        self.error = None;
        Some(PageRequest {
            epoch: self.epoch,
            media: self.media,
            page: self.current_page + 1,
            filter: self.filter,
        })
    }

    /// Apply a fetch completion.
    ///
    /// Returns `false` when the completion was stale (its epoch differs
    /// from the current one) and was discarded without touching state.
    pub fn apply_page(
        &mut self,
        request: &PageRequest,
        result: Result<Page<CatalogItem>, CatalogError>,
    ) -> bool {
        if request.epoch != self.epoch {
            tracing::debug!(
                media = %self.media,
                stale_epoch = request.epoch,
                epoch = self.epoch,
                page = request.page,
                "Discarding stale page result"
            );
            return false;
        }
        debug_assert_eq!(request.media, self.media);

        match result {
            Ok(page) => {
                if self.is_initial_loading {
                    self.items = page.items;
                } else {
                    self.items.extend(page.items);
                }
                // Server-reported count, clamped to 1 by the client
                self.total_pages = page.total_pages.max(1);
                self.current_page = request.page.min(self.total_pages);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(
                    media = %self.media,
                    page = request.page,
                    error = %e,
                    "Page fetch failed"
                );
                self.error = Some(e.to_string());
            }
        }
        self.is_initial_loading = false;
        self.is_loading_more = false;
        true
    }

    /// The read-only tuple the presentation layer renders from.
    pub fn view(&self) -> BrowseView<'_> {
        BrowseView {
            items: &self.items,
            is_initial_loading: self.is_initial_loading,
            is_loading_more: self.is_loading_more,
            has_more: self.current_page < self.total_pages,
            error: self.error.as_deref(),
            filter: self.filter,
        }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }
}

// ============================================================================
// Tests
// ============================================================================
