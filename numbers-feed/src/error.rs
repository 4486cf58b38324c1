/// Why a page could not be loaded. Every variant puts the feed into its error state.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("server answered with status {0}")]
    Status(u16),
    #[error("malformed page: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("page for cursor {cursor} starts at {got}, expected {expected}")]
    UnexpectedStart { cursor: u64, expected: u64, got: u64 },
    #[error("next cursor {next} does not advance past {cursor}")]
    CursorNotAdvancing { cursor: u64, next: u64 },
}

/// A response handed back with a ticket that is not the one in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CompleteError {
    #[error("no fetch is in flight")]
    NotInFlight,
    #[error("response for request #{got} while request #{expected} is in flight")]
    StaleRequest { expected: u64, got: u64 },
}
