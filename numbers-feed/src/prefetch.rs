/// Decides, after each windowing pass, whether the next page should be requested.
///
/// The rule: the highest mounted index has reached the last loaded row (or the loader slot
/// after it), more pages may exist, and no fetch is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Prefetcher {
    triggered: u64,
    suppressed: u64,
}

impl Prefetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// The prefetch rule as a pure predicate.
    pub fn should_fetch(
        last_index: usize,
        rows_len: usize,
        has_more: bool,
        in_flight: bool,
    ) -> bool {
        last_index + 1 >= rows_len && has_more && !in_flight
    }

    /// Runs the rule for one windowing pass and records the outcome.
    ///
    /// `last_index` is the highest mounted index, `None` when nothing is mounted.
    pub fn observe(
        &mut self,
        last_index: Option<usize>,
        rows_len: usize,
        has_more: bool,
        in_flight: bool,
    ) -> bool {
        let Some(last_index) = last_index else {
            return false;
        };
        if Self::should_fetch(last_index, rows_len, has_more, in_flight) {
            self.triggered += 1;
            ftrace!(last_index, rows_len, "prefetch triggered");
            return true;
        }
        if last_index + 1 >= rows_len && has_more {
            self.suppressed += 1;
        }
        false
    }

    /// Passes that asked for a page.
    pub fn triggered(&self) -> u64 {
        self.triggered
    }

    /// Passes that reached the end while a fetch was already in flight.
    pub fn suppressed(&self) -> u64 {
        self.suppressed
    }
}
