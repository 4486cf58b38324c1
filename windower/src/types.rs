use alloc::vec::Vec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// Size of the scroll container.
///
/// `main` is the scrolled axis (height for a vertical list), `cross` the other one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub main: u32,
    pub cross: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl VirtualRange {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }
}

/// One mounted row: its index in the list and where it sits on the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualItem {
    pub index: usize,
    /// Start offset in the scroll axis (includes `padding_start`).
    pub start: u64,
    pub size: u32,
}

impl VirtualItem {
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.size as u64)
    }
}

/// The result of one windowing pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    /// Overscanned items, ascending by index.
    pub items: Vec<VirtualItem>,
    /// Indices intersecting the viewport (no overscan).
    pub visible: VirtualRange,
    pub total_size: u64,
}

impl Window {
    pub fn last(&self) -> Option<&VirtualItem> {
        self.items.last()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
