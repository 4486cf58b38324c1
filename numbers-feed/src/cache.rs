use sequence_api::{DEFAULT_LIMIT, NumbersPage, NumbersQuery};

use crate::FetchError;
use crate::error::CompleteError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FetchStatus {
    #[default]
    Idle,
    LoadingFirst,
    LoadingNext,
    /// Terminal until the cache is reset.
    Error,
    /// The source reported no further cursor.
    Exhausted,
}

impl FetchStatus {
    pub fn is_loading(self) -> bool {
        matches!(self, Self::LoadingFirst | Self::LoadingNext)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageCacheOptions {
    /// Page size requested from the source.
    pub limit: u32,
}

impl Default for PageCacheOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageCacheOptions {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// The ticket for one outstanding fetch.
///
/// The host performs the request and hands the ticket back together with the result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRequest {
    /// Position of this request among all requests issued by the cache.
    pub seq: u64,
    pub cursor: u64,
    pub limit: u32,
}

impl PageRequest {
    pub fn query(&self) -> NumbersQuery {
        NumbersQuery::new(self.cursor, self.limit)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedPage {
    /// The cursor this page was requested with.
    pub cursor: u64,
    pub page: NumbersPage,
}

/// Ordered pages fetched so far and the single fetch that may be in flight.
///
/// Pages are only ever appended, by [`PageCache::complete`]; cursors therefore increase
/// strictly along [`PageCache::pages`].
#[derive(Debug, Default)]
pub struct PageCache {
    options: PageCacheOptions,
    pages: Vec<CachedPage>,
    next_cursor: u64,
    status: FetchStatus,
    in_flight: Option<PageRequest>,
    error: Option<FetchError>,
    issued: u64,
}

impl PageCache {
    pub fn new(options: PageCacheOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &PageCacheOptions {
        &self.options
    }

    pub fn pages(&self) -> &[CachedPage] {
        &self.pages
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    /// `false` once the source reported no further cursor.
    pub fn has_more(&self) -> bool {
        self.status != FetchStatus::Exhausted
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<PageRequest> {
        self.in_flight
    }

    pub fn next_cursor(&self) -> u64 {
        self.next_cursor
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Number of requests issued since construction.
    pub fn request_count(&self) -> u64 {
        self.issued
    }

    /// Starts fetching the page at `next_cursor`.
    ///
    /// Returns `None` without side effects while a fetch is in flight, after a failure and once
    /// the source is exhausted.
    pub fn fetch_next(&mut self) -> Option<PageRequest> {
        if let Some(pending) = self.in_flight {
            ftrace!(seq = pending.seq, "fetch_next: already in flight");
            return None;
        }
        if matches!(self.status, FetchStatus::Error | FetchStatus::Exhausted) {
            return None;
        }

        let request = PageRequest {
            seq: self.issued,
            cursor: self.next_cursor,
            limit: self.options.limit,
        };
        self.issued += 1;
        self.in_flight = Some(request);
        self.status = if self.pages.is_empty() {
            FetchStatus::LoadingFirst
        } else {
            FetchStatus::LoadingNext
        };
        fdebug!(
            seq = request.seq,
            cursor = request.cursor,
            limit = request.limit,
            "fetch issued"
        );
        Some(request)
    }

    /// Applies the outcome of the in-flight request and returns the resulting status.
    ///
    /// A page that does not continue the sequence right after the requested cursor counts as a
    /// failed fetch. Ticket mismatches are rejected without touching any state.
    pub fn complete(
        &mut self,
        request: PageRequest,
        result: Result<NumbersPage, FetchError>,
    ) -> Result<FetchStatus, CompleteError> {
        let Some(expected) = self.in_flight else {
            fwarn!(seq = request.seq, "complete: nothing in flight");
            return Err(CompleteError::NotInFlight);
        };
        if expected != request {
            fwarn!(
                expected = expected.seq,
                got = request.seq,
                "complete: stale request"
            );
            return Err(CompleteError::StaleRequest {
                expected: expected.seq,
                got: request.seq,
            });
        }
        self.in_flight = None;

        match result.and_then(|page| check_continuity(&request, page)) {
            Ok(page) => {
                let next = page.continuation();
                fdebug!(
                    seq = request.seq,
                    rows = page.len(),
                    next = ?next,
                    "fetch completed"
                );
                self.pages.push(CachedPage {
                    cursor: request.cursor,
                    page,
                });
                match next {
                    Some(cursor) => {
                        self.next_cursor = cursor;
                        self.status = FetchStatus::Idle;
                    }
                    None => self.status = FetchStatus::Exhausted,
                }
            }
            Err(err) => {
                fwarn!(seq = request.seq, error = %err, "fetch failed");
                self.error = Some(err);
                self.status = FetchStatus::Error;
            }
        }
        Ok(self.status)
    }

    /// Drops every page and returns to the freshly constructed state.
    ///
    /// Request numbering keeps counting so tickets issued before the reset stay stale.
    pub fn reset(&mut self) {
        fdebug!(pages = self.pages.len(), "page cache reset");
        let issued = self.issued;
        *self = Self::new(self.options);
        self.issued = issued;
    }
}

fn check_continuity(request: &PageRequest, page: NumbersPage) -> Result<NumbersPage, FetchError> {
    let expected = request.cursor.saturating_add(1);
    if let Some(first) = page.first() {
        if first != expected {
            return Err(FetchError::UnexpectedStart {
                cursor: request.cursor,
                expected,
                got: first,
            });
        }
    }
    if let Some(next) = page.continuation() {
        if next <= request.cursor {
            return Err(FetchError::CursorNotAdvancing {
                cursor: request.cursor,
                next,
            });
        }
    }
    Ok(page)
}
