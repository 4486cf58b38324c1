use core::fmt;

use sequence_api::NumbersPage;
use windower::{Rect, VirtualItem, VirtualRange, Windower, WindowerOptions};

use crate::{
    CompleteError, FetchError, FetchStatus, PageCache, PageCacheOptions, PageRequest, PageSource,
    Prefetcher, RowList, ShellView,
};

#[derive(Clone, Debug, Default)]
pub struct FeedOptions {
    pub page: PageCacheOptions,
    /// Windowing configuration; `count` is managed by the feed.
    pub window: WindowerOptions,
}

impl FeedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.page.limit = limit;
        self
    }

    pub fn with_item_size(mut self, item_size: u32) -> Self {
        self.window.item_size = item_size;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.window.overscan = overscan;
        self
    }

    pub fn with_viewport(mut self, rect: Rect) -> Self {
        self.window.initial_rect = Some(rect);
        self
    }

    pub fn with_window(mut self, window: WindowerOptions) -> Self {
        self.window = window;
        self
    }
}

/// An infinite list view: page cache, row list, windower and prefetch wired together.
///
/// The feed holds no UI objects and performs no I/O. Adapters drive it by calling:
/// - `on_viewport_size` / `on_scroll` when UI events occur,
/// - `complete` when a requested page arrives (or fails),
/// - `tick(now_ms)` on a timer for `is_scrolling` debouncing.
///
/// Every call that can change what is mounted re-runs the windowing pass and the prefetch rule,
/// and returns the page request to perform, if any. At most one request is outstanding at a
/// time.
#[derive(Debug)]
pub struct Feed {
    windower: Windower,
    cache: PageCache,
    rows: RowList,
    prefetch: Prefetcher,
}

impl Feed {
    /// Creates the feed and issues the first page request.
    pub fn mount(options: FeedOptions) -> (Self, Option<PageRequest>) {
        let mut feed = Self {
            windower: Windower::new(options.window),
            cache: PageCache::new(options.page),
            rows: RowList::new(),
            prefetch: Prefetcher::new(),
        };
        feed.sync_count();
        let first = feed.fetch_next();
        (feed, first)
    }

    /// Drops all loaded data and starts over from the first page, as a page reload would.
    ///
    /// This is the only way out of the error state.
    pub fn remount(&mut self) -> Option<PageRequest> {
        fdebug!(rows = self.rows.len(), "remount");
        self.cache.reset();
        self.rows.clear();
        self.prefetch = Prefetcher::new();
        self.windower.batch_update(|w| {
            w.set_scroll_offset(0);
            w.stop_scrolling();
        });
        self.sync_count();
        self.fetch_next()
    }

    pub fn windower(&self) -> &Windower {
        &self.windower
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    pub fn rows(&self) -> &RowList {
        &self.rows
    }

    pub fn prefetcher(&self) -> &Prefetcher {
        &self.prefetch
    }

    pub fn status(&self) -> FetchStatus {
        self.cache.status()
    }

    pub fn has_more(&self) -> bool {
        self.cache.has_more()
    }

    pub fn is_fetching(&self) -> bool {
        self.cache.is_fetching()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.cache.error()
    }

    /// Rows plus the loader slot while more pages may exist.
    pub fn item_count(&self) -> usize {
        self.rows.len() + usize::from(self.cache.has_more())
    }

    /// Index of the loader slot, if it exists.
    pub fn loader_index(&self) -> Option<usize> {
        self.cache.has_more().then_some(self.rows.len())
    }

    pub fn visible_range(&self) -> VirtualRange {
        self.windower.visible_range()
    }

    pub fn virtual_items(&self) -> Vec<VirtualItem> {
        self.windower.virtual_items()
    }

    pub fn total_size(&self) -> u64 {
        self.windower.total_size()
    }

    /// Requests the next page unless one is already in flight.
    pub fn fetch_next(&mut self) -> Option<PageRequest> {
        self.cache.fetch_next()
    }

    pub fn on_viewport_size(&mut self, viewport_main: u32) -> Option<PageRequest> {
        self.windower.set_viewport_size(viewport_main);
        self.observe()
    }

    pub fn on_resize(&mut self, rect: Rect) -> Option<PageRequest> {
        self.windower.set_scroll_rect(rect);
        self.observe()
    }

    /// Call this when the UI reports a scroll offset change (e.g. user wheel/drag).
    pub fn on_scroll(&mut self, scroll_offset: u64, now_ms: u64) -> Option<PageRequest> {
        self.windower
            .apply_scroll_offset_event_clamped(scroll_offset, now_ms);
        self.observe()
    }

    /// Runs `is_scrolling` debouncing.
    pub fn tick(&mut self, now_ms: u64) {
        self.windower.update_scrolling(now_ms);
    }

    /// Hands the outcome of `request` to the page cache.
    ///
    /// On success the new rows are appended and the window recomputed, which may immediately
    /// ask for the following page.
    pub fn complete(
        &mut self,
        request: PageRequest,
        result: Result<NumbersPage, FetchError>,
    ) -> Result<Option<PageRequest>, CompleteError> {
        let before = self.cache.pages().len();
        self.cache.complete(request, result)?;
        for cached in &self.cache.pages()[before..] {
            self.rows.extend_from_page(&cached.page);
        }
        self.sync_count();
        Ok(self.observe())
    }

    /// Resolves outstanding requests against `source` until none is left.
    ///
    /// Returns the number of requests served.
    pub fn pump(&mut self, source: &mut impl PageSource) -> Result<usize, CompleteError> {
        let mut served = 0;
        while let Some(request) = self.cache.in_flight() {
            let result = source.fetch(&request);
            self.complete(request, result)?;
            served += 1;
        }
        Ok(served)
    }

    pub fn view(&self) -> ShellView {
        ShellView::build(
            self.cache.status(),
            self.cache.error().map(|e| e as &dyn fmt::Display),
            &self.rows,
            self.cache.has_more(),
            self.windower.total_size(),
            &self.windower.virtual_items(),
        )
    }

    fn sync_count(&mut self) {
        let count = self.item_count();
        self.windower.set_count(count);
    }

    // Prefetch observer, run after every windowing pass.
    fn observe(&mut self) -> Option<PageRequest> {
        if self.cache.status() == FetchStatus::Error {
            return None;
        }
        let last = self.windower.last_virtual_item().map(|it| it.index);
        let fire = self.prefetch.observe(
            last,
            self.rows.len(),
            self.cache.has_more(),
            self.cache.is_fetching(),
        );
        if fire { self.cache.fetch_next() } else { None }
    }
}
