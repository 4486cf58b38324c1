use serde::{Deserialize, Serialize};

/// One batch of the sequence: the `limit` numbers after a cursor, plus where to resume.
///
/// This is also the wire format of `GET /api/numbers`:
/// `{"rows":[11,12,13],"nextCursor":13}`. `nextCursor` is omitted once the sequence cannot
/// continue.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumbersPage {
    pub rows: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<u64>,
}

impl NumbersPage {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<u64> {
        self.rows.first().copied()
    }

    pub fn last(&self) -> Option<u64> {
        self.rows.last().copied()
    }

    /// The cursor to request next, treating an absent or zero cursor as the end of the sequence.
    pub fn continuation(&self) -> Option<u64> {
        self.next_cursor.filter(|&c| c != 0)
    }
}

/// Returns the `limit` numbers following `cursor`: `[cursor + 1, ..., cursor + limit]`.
///
/// Pure and deterministic. The sequence only ends at `u64::MAX`: a page that would run past it
/// is cut short and carries no next cursor.
pub fn generate(cursor: u64, limit: u32) -> NumbersPage {
    match cursor.checked_add(u64::from(limit)) {
        Some(end) => NumbersPage {
            rows: (cursor..end).map(|n| n + 1).collect(),
            next_cursor: Some(end),
        },
        None => NumbersPage {
            rows: (cursor..u64::MAX).map(|n| n + 1).collect(),
            next_cursor: None,
        },
    }
}
