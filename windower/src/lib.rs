//! Fixed-row viewport windowing for lazily grown lists.
//!
//! Given an item count, a row size and the scroll container's offset and size, this crate
//! answers which rows intersect the viewport, where each one sits, and how tall the scrollable
//! content is. Only those rows (plus a small overscan margin) need to be mounted.
//!
//! Two entry points:
//! - [`compute_window`]: the windowing step as a pure function of
//!   `(scroll_offset, viewport_size, count, item_size, overscan)`.
//! - [`Windower`]: the same math behind a small state machine that tracks scroll offset,
//!   viewport rect, scroll direction and `is_scrolling`, and notifies an `on_change` callback.
//!
//! It is UI-agnostic. The host provides the viewport size and scroll offset and renders
//! whatever the windower returns.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod layout;
mod options;
mod state;
mod types;
mod windower;

#[cfg(test)]
mod tests;

pub use layout::{FixedLayout, compute_window};
pub use options::{
    DEFAULT_ITEM_SIZE, DEFAULT_OVERSCAN, DEFAULT_SCROLLING_RESET_DELAY_MS, OnChangeCallback,
    WindowerOptions,
};
pub use state::{FrameState, ScrollState, ViewportState};
pub use types::{Align, Rect, ScrollDirection, VirtualItem, VirtualRange, Window};
pub use windower::Windower;
