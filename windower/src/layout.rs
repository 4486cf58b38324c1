use alloc::vec::Vec;
use core::cmp;

use crate::{VirtualItem, VirtualRange, Window};

/// Geometry of a list whose rows all share one size.
///
/// Every query here is O(1): with a fixed row size, offset → index is a division and the total
/// size is a multiplication, so nothing needs to be cached as the list grows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedLayout {
    pub count: usize,
    pub item_size: u32,
    pub padding_start: u32,
    pub padding_end: u32,
}

impl FixedLayout {
    pub fn new(count: usize, item_size: u32) -> Self {
        Self {
            count,
            item_size,
            padding_start: 0,
            padding_end: 0,
        }
    }

    /// Size of the rows alone (no padding).
    pub fn items_size(&self) -> u64 {
        (self.item_size as u64).saturating_mul(self.count as u64)
    }

    pub fn total_size(&self) -> u64 {
        (self.padding_start as u64)
            .saturating_add(self.items_size())
            .saturating_add(self.padding_end as u64)
    }

    pub fn max_scroll_offset(&self, viewport_size: u32) -> u64 {
        self.total_size().saturating_sub(viewport_size as u64)
    }

    pub fn item_start(&self, index: usize) -> u64 {
        let rows = (self.item_size as u64).saturating_mul(index as u64);
        (self.padding_start as u64).saturating_add(rows)
    }

    pub fn item(&self, index: usize) -> VirtualItem {
        VirtualItem {
            index,
            start: self.item_start(index),
            size: self.item_size,
        }
    }

    /// Maps an offset onto the row covering it. Offsets inside the leading padding map to the
    /// first row and offsets past the last row map to the last row.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        if self.count == 0 || self.item_size == 0 {
            return None;
        }
        let ps = self.padding_start as u64;
        if offset < ps {
            return Some(0);
        }
        let i = (offset - ps) / self.item_size as u64;
        let i = usize::try_from(i).unwrap_or(usize::MAX);
        Some(i.min(self.count - 1))
    }

    /// Rows intersecting `[scroll_offset, scroll_offset + viewport_size)`.
    ///
    /// The offset is clamped to the maximum scroll offset first, the same way a scroll container
    /// never lets its content scroll past the end.
    pub fn visible_range(&self, scroll_offset: u64, viewport_size: u32) -> VirtualRange {
        let count = self.count;
        if count == 0 || viewport_size == 0 || self.item_size == 0 {
            return VirtualRange::EMPTY;
        }

        let view = viewport_size as u64;
        let offset = scroll_offset.min(self.max_scroll_offset(viewport_size));
        let end_exclusive = offset.saturating_add(view);

        let ps = self.padding_start as u64;
        let items_end = ps.saturating_add(self.items_size());
        if end_exclusive <= ps {
            return VirtualRange::EMPTY;
        }
        if offset >= items_end {
            return VirtualRange {
                start_index: count,
                end_index: count,
            };
        }

        let last_px = cmp::min(end_exclusive, items_end).saturating_sub(1);
        let start = self.index_at_offset(offset).unwrap_or(count);
        let end = self
            .index_at_offset(cmp::max(last_px, offset))
            .map(|i| i + 1)
            .unwrap_or(count);

        VirtualRange {
            start_index: start.min(count),
            end_index: end.min(count),
        }
    }

    /// Extends a visible range by `overscan` rows on each side.
    pub fn overscanned(&self, visible: VirtualRange, overscan: usize) -> VirtualRange {
        if visible.is_empty() {
            return visible;
        }
        VirtualRange {
            start_index: visible.start_index.saturating_sub(overscan),
            end_index: cmp::min(self.count, visible.end_index.saturating_add(overscan)),
        }
    }

    /// Rows to mount: the visible rows plus `overscan` on each side.
    ///
    /// When the viewport only covers padding, the nearest edge row stands in for the visible
    /// range, so the first and last rows stay mounted however large the padding is.
    pub fn virtual_range(
        &self,
        scroll_offset: u64,
        viewport_size: u32,
        overscan: usize,
    ) -> VirtualRange {
        let visible = self.visible_range(scroll_offset, viewport_size);
        self.overscanned(self.anchor_to_edge(visible, viewport_size), overscan)
    }

    fn anchor_to_edge(&self, visible: VirtualRange, viewport_size: u32) -> VirtualRange {
        if !visible.is_empty() || self.count == 0 || self.item_size == 0 || viewport_size == 0 {
            return visible;
        }
        let edge = if visible.start_index >= self.count {
            self.count - 1
        } else {
            0
        };
        VirtualRange {
            start_index: edge,
            end_index: edge + 1,
        }
    }

    pub fn for_each_item(&self, range: VirtualRange, mut f: impl FnMut(VirtualItem)) {
        let end = cmp::min(range.end_index, self.count);
        let mut start = self.item_start(range.start_index);
        for index in range.start_index..end {
            f(VirtualItem {
                index,
                start,
                size: self.item_size,
            });
            start = start.saturating_add(self.item_size as u64);
        }
    }

    pub fn window(&self, scroll_offset: u64, viewport_size: u32, overscan: usize) -> Window {
        let visible = self.visible_range(scroll_offset, viewport_size);
        let range = self.virtual_range(scroll_offset, viewport_size, overscan);
        let mut items = Vec::with_capacity(range.len());
        self.for_each_item(range, |it| items.push(it));
        Window {
            items,
            visible,
            total_size: self.total_size(),
        }
    }
}

/// Recomputes the windowed view of a fixed-row list.
///
/// This is the whole windowing step as a pure function: hosts call it on scroll, on resize and
/// whenever the item count changes, and render exactly `Window::items`.
///
/// ```
/// let w = windower::compute_window(120, 100, 1_000, 50, 1);
/// // rows 2..=4 intersect [120, 220); one row of overscan on each side.
/// assert_eq!(w.visible.start_index, 2);
/// assert_eq!(w.visible.end_index, 5);
/// assert_eq!(w.items.first().map(|it| it.index), Some(1));
/// assert_eq!(w.items.last().map(|it| it.index), Some(5));
/// assert_eq!(w.total_size, 50_000);
/// ```
pub fn compute_window(
    scroll_offset: u64,
    viewport_size: u32,
    count: usize,
    item_size: u32,
    overscan: usize,
) -> Window {
    FixedLayout::new(count, item_size).window(scroll_offset, viewport_size, overscan)
}
