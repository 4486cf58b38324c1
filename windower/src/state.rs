use crate::Rect;

/// Scroll container geometry at a point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub rect: Rect,
}

/// Scroll position at a point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub offset: u64,
    pub is_scrolling: bool,
}

/// Viewport + scroll snapshot.
///
/// Hosts capture this before tearing a list view down and hand it back after remounting so the
/// user lands on the same rows. With `feature = "serde"` it can be stored as JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameState {
    pub viewport: ViewportState,
    pub scroll: ScrollState,
}
