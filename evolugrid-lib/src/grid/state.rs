//! Per-instance navigation state.

use crate::query::SortState;

/// Status of the most recent request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// No request in flight.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request failed.
    Failed,
}

/// Phase of the infinite-scroll state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    /// The next boundary event fetches more rows.
    Ready,
    /// A fetch is in flight; boundary events are ignored.
    Loading,
    /// The server has no more rows; boundary events reveal the indicator.
    Exhausted,
}

/// Cursor and guards of the infinite-scroll controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollState {
    /// Offset of the next fetch.
    pub offset: u64,
    /// `false` while a fetch is in flight.
    pub ready: bool,
    /// Set once the server reports fewer rows than fetched so far.
    pub no_more_results: bool,
}

impl ScrollState {
    /// Returns the current phase.
    pub fn phase(&self) -> ScrollPhase {
        if !self.ready {
            ScrollPhase::Loading
        } else if self.no_more_results {
            ScrollPhase::Exhausted
        } else {
            ScrollPhase::Ready
        }
    }

    /// Rewinds to the first row and clears the end-of-results flag.
    pub fn rewind(&mut self) {
        self.offset = 0;
        self.no_more_results = false;
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset: 0,
            ready: true,
            no_more_results: false,
        }
    }
}

/// Navigation state of one grid instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// Current sort.
    pub sort: SortState,
    /// Last rendered page in paging mode.
    pub current_page: u64,
    /// Scroll cursor in infinite-scroll mode.
    pub scroll: ScrollState,
    /// Status of the latest request.
    pub status: LoadStatus,
}
