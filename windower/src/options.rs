use alloc::sync::Arc;

use crate::Rect;
use crate::windower::Windower;

/// Called after every state change; the second argument is `is_scrolling`.
pub type OnChangeCallback = Arc<dyn Fn(&Windower, bool) + Send + Sync>;

/// Row height used when none is configured.
pub const DEFAULT_ITEM_SIZE: u32 = 50;
/// Rows rendered beyond each viewport edge when none is configured.
pub const DEFAULT_OVERSCAN: usize = 5;
/// How long `is_scrolling` outlives the last scroll event.
pub const DEFAULT_SCROLLING_RESET_DELAY_MS: u64 = 150;

/// Configuration for [`crate::Windower`].
#[derive(Clone)]
pub struct WindowerOptions {
    pub count: usize,
    /// Height of every row.
    pub item_size: u32,
    pub overscan: usize,

    /// Scroll container size until the host reports one.
    pub initial_rect: Option<Rect>,
    pub initial_offset: u64,

    /// Space before the first row.
    pub padding_start: u32,
    /// Space after the last row.
    pub padding_end: u32,

    pub on_change: Option<OnChangeCallback>,
    pub is_scrolling_reset_delay_ms: u64,
}

impl WindowerOptions {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            item_size: DEFAULT_ITEM_SIZE,
            overscan: DEFAULT_OVERSCAN,
            initial_rect: None,
            initial_offset: 0,
            padding_start: 0,
            padding_end: 0,
            on_change: None,
            is_scrolling_reset_delay_ms: DEFAULT_SCROLLING_RESET_DELAY_MS,
        }
    }

    pub fn with_item_size(mut self, item_size: u32) -> Self {
        self.item_size = item_size;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_initial_rect(mut self, initial_rect: Option<Rect>) -> Self {
        self.initial_rect = initial_rect;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: u64) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_padding(mut self, padding_start: u32, padding_end: u32) -> Self {
        self.padding_start = padding_start;
        self.padding_end = padding_end;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: impl Fn(&Windower, bool) + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Arc::new(on_change));
        self
    }

    pub fn with_is_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.is_scrolling_reset_delay_ms = delay_ms;
        self
    }
}

impl Default for WindowerOptions {
    fn default() -> Self {
        Self::new(0)
    }
}

impl core::fmt::Debug for WindowerOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowerOptions")
            .field("count", &self.count)
            .field("item_size", &self.item_size)
            .field("overscan", &self.overscan)
            .field("initial_rect", &self.initial_rect)
            .field("initial_offset", &self.initial_offset)
            .field("padding", &(self.padding_start, self.padding_end))
            .field("on_change", &self.on_change.is_some())
            .field(
                "is_scrolling_reset_delay_ms",
                &self.is_scrolling_reset_delay_ms,
            )
            .finish()
    }
}
