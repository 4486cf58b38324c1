//! An infinite, windowed list of numbers loaded page by page as the user scrolls.
//!
//! The pieces, leaf-first:
//!
//! - [`PageCache`]: ordered pages keyed by cursor, plus the one fetch that may be in flight.
//! - [`RowList`]: the pages flattened into list rows.
//! - [`windower::Windower`]: which rows (and the trailing loader slot) are mounted.
//! - [`Prefetcher`]: after every windowing pass, asks for the next page once the mounted
//!   window reaches the end of the loaded rows.
//! - [`ShellView`]: loading / error / list view model.
//!
//! [`Feed`] owns all of them. It performs no I/O: fetches leave the feed as [`PageRequest`]
//! tickets and come back through [`Feed::complete`].
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod cache;
mod error;
mod feed;
mod prefetch;
mod rows;
mod shell;
mod source;


pub use cache::{CachedPage, FetchStatus, PageCache, PageCacheOptions, PageRequest};
pub use error::{CompleteError, FetchError};
pub use feed::{Feed, FeedOptions};
pub use prefetch::Prefetcher;
pub use rows::{RowList, materialize};
pub use shell::{
    ERROR_TEXT, LOADING_MORE_TEXT, ListView, NO_MORE_DATA_TEXT, RowContent, RowView, ShellView,
};
pub use source::{EndpointSource, PageSource};

pub use sequence_api::NumbersPage;
