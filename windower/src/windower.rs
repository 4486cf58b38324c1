use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::{
    Align, FixedLayout, FrameState, Rect, ScrollDirection, ScrollState, ViewportState,
    VirtualItem, VirtualRange, Window, WindowerOptions,
};

// An ongoing scroll gesture.
#[derive(Clone, Copy, Debug)]
struct ScrollActivity {
    direction: Option<ScrollDirection>,
    last_event_ms: u64,
}

/// Scroll state plus fixed-row windowing for a list that grows while it is being scrolled.
///
/// The host drives it with viewport geometry and scroll offsets; every query recomputes from
/// that state, so growing `count` between frames never leaves stale geometry behind.
#[derive(Clone, Debug)]
pub struct Windower {
    options: WindowerOptions,
    rect: Rect,
    scroll_offset: u64,
    activity: Option<ScrollActivity>,

    batch_depth: usize,
    batch_dirty: bool,
}

impl Windower {
    pub fn new(options: WindowerOptions) -> Self {
        wdebug!(
            count = options.count,
            item_size = options.item_size,
            overscan = options.overscan,
            "Windower::new"
        );
        Self {
            rect: options.initial_rect.unwrap_or_default(),
            scroll_offset: options.initial_offset,
            activity: None,
            batch_depth: 0,
            batch_dirty: false,
            options,
        }
    }

    pub fn options(&self) -> &WindowerOptions {
        &self.options
    }

    /// Runs `f` and fires `on_change` at most once, after `f` returns.
    ///
    /// Batches nest; only the outermost one notifies.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth += 1;
        f(self);
        self.batch_depth -= 1;
        if self.batch_depth == 0 && core::mem::take(&mut self.batch_dirty) {
            self.emit();
        }
    }

    fn changed(&mut self) {
        if self.batch_depth > 0 {
            self.batch_dirty = true;
        } else {
            self.emit();
        }
    }

    fn emit(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self, self.is_scrolling());
        }
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn item_size(&self) -> u32 {
        self.options.item_size
    }

    pub fn overscan(&self) -> usize {
        self.options.overscan
    }

    pub fn is_scrolling(&self) -> bool {
        self.activity.is_some()
    }

    /// Direction of the current scroll gesture; `None` while idle.
    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.activity.and_then(|a| a.direction)
    }

    pub fn viewport_size(&self) -> u32 {
        self.rect.main
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: ViewportState { rect: self.rect },
            scroll: ScrollState {
                offset: self.scroll_offset,
                is_scrolling: self.is_scrolling(),
            },
        }
    }

    /// Restores a previously captured snapshot.
    ///
    /// The offset is not clamped: the list may still be loading back up to the saved position.
    pub fn restore_frame_state(&mut self, frame: FrameState, now_ms: u64) {
        self.batch_update(|w| {
            w.set_scroll_rect(frame.viewport.rect);
            if frame.scroll.is_scrolling {
                w.scroll_event(frame.scroll.offset, now_ms);
            } else {
                w.set_scroll_offset(frame.scroll.offset);
                w.stop_scrolling();
            }
        });
    }

    pub fn set_scroll_rect(&mut self, rect: Rect) {
        if self.rect != rect {
            self.rect = rect;
            self.changed();
        }
    }

    pub fn set_viewport_size(&mut self, size: u32) {
        self.set_scroll_rect(Rect {
            main: size,
            ..self.rect
        });
    }

    /// Moves the content without starting a scroll gesture.
    pub fn set_scroll_offset(&mut self, offset: u64) {
        if self.scroll_offset != offset {
            self.scroll_offset = offset;
            self.changed();
        }
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        self.set_scroll_offset(self.clamp_scroll_offset(offset));
    }

    pub fn set_viewport_and_scroll(&mut self, viewport_size: u32, scroll_offset: u64) {
        self.batch_update(|w| {
            w.set_viewport_size(viewport_size);
            w.set_scroll_offset(scroll_offset);
        });
    }

    /// A user scroll (wheel, drag, scrollbar): moves the offset and marks the windower as
    /// scrolling until [`Windower::update_scrolling`] sees the gesture go quiet.
    pub fn apply_scroll_offset_event(&mut self, offset: u64, now_ms: u64) {
        self.batch_update(|w| w.scroll_event(offset, now_ms));
    }

    /// Like [`Windower::apply_scroll_offset_event`], with the offset clamped to the content.
    pub fn apply_scroll_offset_event_clamped(&mut self, offset: u64, now_ms: u64) {
        let offset = self.clamp_scroll_offset(offset);
        self.apply_scroll_offset_event(offset, now_ms);
    }

    /// Viewport rect and scroll offset of one frame, with a single notification.
    pub fn apply_scroll_frame(&mut self, rect: Rect, scroll_offset: u64, now_ms: u64) {
        self.batch_update(|w| {
            w.set_scroll_rect(rect);
            w.scroll_event(scroll_offset, now_ms);
        });
    }

    fn scroll_event(&mut self, offset: u64, now_ms: u64) {
        wtrace!(offset, now_ms, viewport = self.rect.main, "scroll event");
        let direction = match offset.cmp(&self.scroll_offset) {
            Ordering::Greater => Some(ScrollDirection::Forward),
            Ordering::Less => Some(ScrollDirection::Backward),
            Ordering::Equal => self.scroll_direction(),
        };
        self.activity = Some(ScrollActivity {
            direction,
            last_event_ms: now_ms,
        });
        self.scroll_offset = offset;
        self.changed();
    }

    /// Ends the current scroll gesture, if any.
    pub fn stop_scrolling(&mut self) {
        if self.activity.take().is_some() {
            self.changed();
        }
    }

    /// Ends the scroll gesture once no scroll event arrived for `is_scrolling_reset_delay_ms`.
    pub fn update_scrolling(&mut self, now_ms: u64) {
        let Some(activity) = self.activity else {
            return;
        };
        let quiet_for = now_ms.saturating_sub(activity.last_event_ms);
        if quiet_for >= self.options.is_scrolling_reset_delay_ms {
            self.stop_scrolling();
        }
    }

    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        wtrace!(from = self.options.count, to = count, "set_count");
        self.options.count = count;
        self.changed();
    }

    pub fn layout(&self) -> FixedLayout {
        FixedLayout {
            count: self.options.count,
            item_size: self.options.item_size,
            padding_start: self.options.padding_start,
            padding_end: self.options.padding_end,
        }
    }

    pub fn total_size(&self) -> u64 {
        self.layout().total_size()
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.layout().max_scroll_offset(self.rect.main)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// Rows intersecting the viewport, without overscan.
    pub fn visible_range(&self) -> VirtualRange {
        self.layout().visible_range(self.scroll_offset, self.rect.main)
    }

    /// Rows to mount; see [`FixedLayout::virtual_range`].
    pub fn virtual_range(&self) -> VirtualRange {
        self.layout().virtual_range(self.scroll_offset, self.rect.main, self.options.overscan)
    }

    pub fn for_each_virtual_item(&self, f: impl FnMut(VirtualItem)) {
        self.layout().for_each_item(self.virtual_range(), f);
    }

    /// Collects virtual items into `out` (clears `out` first).
    ///
    /// Hosts rendering every frame should keep `out` around as a scratch buffer.
    pub fn collect_virtual_items(&self, out: &mut Vec<VirtualItem>) {
        out.clear();
        self.for_each_virtual_item(|it| out.push(it));
    }

    pub fn virtual_items(&self) -> Vec<VirtualItem> {
        let mut out = Vec::with_capacity(self.virtual_range().len());
        self.collect_virtual_items(&mut out);
        out
    }

    /// The highest-index mounted item, if any.
    pub fn last_virtual_item(&self) -> Option<VirtualItem> {
        let range = self.virtual_range();
        (!range.is_empty()).then(|| self.layout().item(range.end_index - 1))
    }

    /// One full windowing pass over the current state.
    pub fn window(&self) -> Window {
        self.layout().window(self.scroll_offset, self.rect.main, self.options.overscan)
    }

    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        self.layout().index_at_offset(offset)
    }

    pub fn item_start(&self, index: usize) -> Option<u64> {
        (index < self.options.count).then(|| self.layout().item_start(index))
    }

    pub fn item_end(&self, index: usize) -> Option<u64> {
        let start = self.item_start(index)?;
        Some(start.saturating_add(self.options.item_size as u64))
    }

    /// Jumps to a row without starting a scroll gesture. Returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.set_scroll_offset(offset);
        offset
    }

    /// The clamped offset that shows row `index` (or the last row) with the given alignment.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        let Some(last) = self.options.count.checked_sub(1) else {
            return 0;
        };
        let item = self.layout().item(index.min(last));
        let view = self.rect.main as u64;
        let shown_from = self.scroll_offset;
        let shown_to = shown_from.saturating_add(view);

        let target = match align {
            Align::Start => item.start,
            Align::End => item.end().saturating_sub(view),
            Align::Center => item
                .start
                .saturating_add(item.size as u64 / 2)
                .saturating_sub(view / 2),
            Align::Auto if item.start >= shown_from && item.end() <= shown_to => shown_from,
            Align::Auto if item.start < shown_from => item.start,
            Align::Auto => item.end().saturating_sub(view),
        };
        self.clamp_scroll_offset(target)
    }
}
