//! Search session state.
//!
//! One `SearchSession` represents a single end-to-end search attempt. The
//! orchestrator owns the active session exclusively; everything else sees
//! read-only snapshots. A new search supersedes the previous session.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::error::LocateError;
use crate::types::{Coordinate, RankedResult};

/// Terminal failure classification for a search session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchFailure {
    /// Location acquisition failed. Carries the exact classification so the
    /// user knows whether to grant permission, retry, or type an address.
    #[error(transparent)]
    Locate(#[from] LocateError),

    /// Every category search failed. Individual category failures are
    /// absorbed; this is only reported when nothing succeeded.
    #[error("all category searches failed: {reason}")]
    Provider { reason: String },
}

/// Lifecycle state of a search session.
///
/// "Done with zero results" is a successful outcome distinct from `Error`;
/// the three user-visible states "still searching", "nothing found nearby",
/// and "something went wrong" must never collapse into one another.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    Locating,
    Searching,
    Done,
    Error(SearchFailure),
}

/// Snapshot of one search attempt.
#[derive(Debug, Clone)]
pub struct SearchSession {
    /// Monotonically increasing id; later sessions supersede earlier ones.
    pub id: u64,
    /// Resolved search origin, once location acquisition succeeds.
    pub origin: Option<Coordinate>,
    /// Best-effort human-readable origin address for display.
    pub display_address: Option<String>,
    pub radius_km: f64,
    pub results: Vec<RankedResult>,
    pub status: SearchStatus,
    pub started_at: DateTime<Utc>,
}

impl SearchSession {
    /// The pre-search placeholder session published before any search runs.
    #[must_use]
    pub fn idle(radius_km: f64) -> Self {
        Self {
            id: 0,
            origin: None,
            display_address: None,
            radius_km,
            results: Vec::new(),
            status: SearchStatus::Idle,
            started_at: Utc::now(),
        }
    }

    /// True once the session has reached a terminal state.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.status, SearchStatus::Done | SearchStatus::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_session_is_not_finished() {
        let session = SearchSession::idle(10.0);
        assert_eq!(session.status, SearchStatus::Idle);
        assert!(!session.is_finished());
        assert!(session.results.is_empty());
    }

    #[test]
    fn done_and_error_are_terminal() {
        let mut session = SearchSession::idle(10.0);
        session.status = SearchStatus::Done;
        assert!(session.is_finished());

        session.status = SearchStatus::Error(SearchFailure::Locate(LocateError::PermissionDenied));
        assert!(session.is_finished());
    }

    #[test]
    fn locate_failure_preserves_classification() {
        let failure = SearchFailure::from(LocateError::PermissionDenied);
        assert_eq!(failure.to_string(), "location permission denied");
    }
}
