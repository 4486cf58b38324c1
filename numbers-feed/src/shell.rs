use core::fmt;

use windower::VirtualItem;

use crate::{FetchStatus, RowList};

pub const LOADING_MORE_TEXT: &str = "Loading more numbers...";
pub const NO_MORE_DATA_TEXT: &str = "No more data to load";
pub const ERROR_TEXT: &str = "Error fetching data.";

/// What one mounted row shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowContent {
    Number(u64),
    LoadingMore,
    NoMoreData,
}

impl fmt::Display for RowContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::LoadingMore => f.write_str(LOADING_MORE_TEXT),
            Self::NoMoreData => f.write_str(NO_MORE_DATA_TEXT),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowView {
    pub index: usize,
    pub start: u64,
    pub size: u32,
    pub content: RowContent,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListView {
    /// Height of the scrollable content.
    pub total_size: u64,
    pub rows: Vec<RowView>,
}

/// The view model of the whole screen.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShellView {
    /// First page still loading.
    Loading,
    /// A fetch failed; the list stays hidden until the feed is remounted.
    Error { message: String, detail: String },
    List(ListView),
}

impl ShellView {
    pub(crate) fn build(
        status: FetchStatus,
        error: Option<&dyn fmt::Display>,
        rows: &RowList,
        has_more: bool,
        total_size: u64,
        items: &[VirtualItem],
    ) -> Self {
        match status {
            FetchStatus::Error => {
                return Self::Error {
                    message: ERROR_TEXT.to_string(),
                    detail: error.map(|e| e.to_string()).unwrap_or_default(),
                };
            }
            FetchStatus::LoadingFirst if rows.is_empty() => return Self::Loading,
            _ => {}
        }

        let rows = items
            .iter()
            .map(|it| RowView {
                index: it.index,
                start: it.start,
                size: it.size,
                content: match rows.get(it.index) {
                    Some(n) => RowContent::Number(n),
                    None if has_more => RowContent::LoadingMore,
                    None => RowContent::NoMoreData,
                },
            })
            .collect();
        Self::List(ListView { total_size, rows })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn list(&self) -> Option<&ListView> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Plain-text rendering, one line per mounted row.
    pub fn render_lines(&self) -> Vec<String> {
        match self {
            Self::Loading => vec!["Loading...".to_string()],
            Self::Error { message, .. } => vec![message.clone()],
            Self::List(list) => list.rows.iter().map(|r| r.content.to_string()).collect(),
        }
    }
}
