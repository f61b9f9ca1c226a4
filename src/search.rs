//! Debounced search interaction
//!
//! Models the search box as an explicit state machine instead of a
//! framework timer primitive. Query edits arm (or re-arm) a pending
//! deadline; only the latest query within a quiet window actually
//! triggers a fetch. The driver polls [`SearchDebouncer::fire`] once the
//! deadline passes, performs the fetch itself, and reports the outcome
//! back through [`SearchDebouncer::complete`].

use std::time::{Duration, Instant};

use crate::catalog::{FetchFailed, Show};

/// Quiet window after the last keystroke before a search fires.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// Minimum trimmed query length that triggers a search.
pub const MIN_QUERY_LEN: usize = 2;

/// User-facing message stored when a search fetch fails.
pub const SEARCH_ERROR_MESSAGE: &str = "Failed to search shows";

/// The three states of the search interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// No search running; results (possibly empty) are current
    Idle,
    /// A fetch for the debounced query is in flight
    Searching,
    /// The last fetch failed; an error message is set
    Errored,
}

/// A query waiting out its debounce window.
#[derive(Debug, Clone)]
struct PendingQuery {
    query: String,
    deadline: Instant,
}

/// Debounced search state machine.
///
/// Time is passed in explicitly, so the machine can be driven by a real
/// timer or stepped deterministically in tests.
#[derive(Debug)]
pub struct SearchDebouncer {
    window: Duration,
    state: SearchState,
    pending: Option<PendingQuery>,
    results: Vec<Show>,
    error: Option<String>,
}

impl SearchDebouncer {
    /// Creates a machine with the standard 300 ms window.
    pub fn new() -> Self {
        Self::with_window(DEBOUNCE_WINDOW)
    }

    /// Creates a machine with a custom debounce window.
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            state: SearchState::Idle,
            pending: None,
            results: Vec::new(),
            error: None,
        }
    }

    /// Records a query edit at `now`.
    ///
    /// A trimmed query shorter than [`MIN_QUERY_LEN`] cancels any pending
    /// search, clears results and error, and settles in `Idle` without
    /// issuing a request. Anything longer arms the deadline at
    /// `now + window`, replacing a previously armed query so that rapid
    /// edits collapse into one fetch.
    pub fn input(&mut self, query: &str, now: Instant) {
        let trimmed = query.trim();
        if trimmed.chars().count() < MIN_QUERY_LEN {
            self.pending = None;
            self.results.clear();
            self.error = None;
            self.state = SearchState::Idle;
            return;
        }

        self.pending = Some(PendingQuery {
            query: trimmed.to_string(),
            deadline: now + self.window,
        });
    }

    /// Returns the armed deadline, if a query is waiting.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Fires the pending query if its quiet window has elapsed by `now`.
    ///
    /// On fire the machine enters `Searching` and hands the query to the
    /// caller, which performs the fetch and reports back via
    /// [`complete`](Self::complete).
    pub fn fire(&mut self, now: Instant) -> Option<String> {
        if self.pending.as_ref()?.deadline > now {
            return None;
        }

        let pending = self.pending.take()?;
        self.state = SearchState::Searching;
        self.error = None;
        Some(pending.query)
    }

    /// Applies the outcome of a fired search.
    ///
    /// Success replaces the results and returns to `Idle`; failure clears
    /// them and moves to `Errored` with a fixed message. Either way the
    /// machine is no longer searching.
    pub fn complete(&mut self, outcome: Result<Vec<Show>, FetchFailed>) {
        match outcome {
            Ok(results) => {
                self.results = results;
                self.error = None;
                self.state = SearchState::Idle;
            }
            Err(e) => {
                tracing::debug!(error = %e, "search fetch failed");
                self.results.clear();
                self.error = Some(SEARCH_ERROR_MESSAGE.to_string());
                self.state = SearchState::Errored;
            }
        }
    }

    /// Current state of the interaction.
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Results of the most recent successful search.
    pub fn results(&self) -> &[Show] {
        &self.results
    }

    /// User-facing error message, set while in `Errored`.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while a fired search has not yet completed.
    pub fn is_searching(&self) -> bool {
        self.state == SearchState::Searching
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
