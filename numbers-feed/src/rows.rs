use sequence_api::NumbersPage;

use crate::CachedPage;

/// Every fetched number in display order.
///
/// Grown in lock-step with the page cache, one page at a time; index `i` is the list row `i`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowList {
    rows: Vec<u64>,
}

impl RowList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend_from_page(&mut self, page: &NumbersPage) {
        self.rows.extend_from_slice(&page.rows);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u64> {
        self.rows.get(index).copied()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.rows
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

/// Flattens pages, in order, into one row list.
pub fn materialize(pages: &[CachedPage]) -> RowList {
    let mut rows = RowList {
        rows: Vec::with_capacity(pages.iter().map(|p| p.page.len()).sum()),
    };
    for cached in pages {
        rows.extend_from_page(&cached.page);
    }
    rows
}
