//! The search orchestrator state machine.
//!
//! Coordinates location acquisition, the concurrent per-category search
//! fan-out, the one-shot backup-query fallback, and final aggregation.
//! States: `Idle -> Locating -> Searching -> Done`, with `Error` reachable
//! from `Locating` or `Searching`; a new search supersedes the active one.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::watch;

use nearaid_core::categories::default_categories;
use nearaid_core::{
    CategoryQueries, Coordinate, LocateError, LocationProvider, PlaceSearch, RankedResult,
    SearchCategory, SearchFailure, SearchSession, SearchStatus,
};

use crate::aggregate::{filter_by_category, merge, rank_candidates, sort_by_distance};

/// Default search radius, in kilometers, when no override is configured.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Static search configuration: distance ceiling and category queries.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub radius_km: f64,
    pub categories: Vec<CategoryQueries>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            categories: default_categories(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Pass {
    Primary,
    Backup,
}

/// Coordinates one search session at a time.
///
/// Owns the active [`SearchSession`] exclusively; observers receive
/// read-only snapshots through a watch channel and always see either the
/// previous complete result set or the next one, never a partial merge.
/// Session ids increase monotonically and late publications from a
/// superseded session are discarded.
pub struct SearchOrchestrator<L, P> {
    location: L,
    places: P,
    config: SearchConfig,
    session_seq: AtomicU64,
    state: watch::Sender<SearchSession>,
}

impl<L: LocationProvider, P: PlaceSearch> SearchOrchestrator<L, P> {
    #[must_use]
    pub fn new(location: L, places: P, config: SearchConfig) -> Self {
        let (state, _) = watch::channel(SearchSession::idle(config.radius_km));
        Self {
            location,
            places,
            config,
            session_seq: AtomicU64::new(0),
            state,
        }
    }

    /// Subscribe to session state changes (for re-rendering on updates).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchSession> {
        self.state.subscribe()
    }

    /// Read-only snapshot of the current session.
    #[must_use]
    pub fn snapshot(&self) -> SearchSession {
        self.state.borrow().clone()
    }

    /// Current results narrowed to one category, non-destructively.
    #[must_use]
    pub fn filter_by_category(&self, category: SearchCategory) -> Vec<RankedResult> {
        filter_by_category(&self.snapshot().results, category)
    }

    /// Start a search from the device position.
    ///
    /// Returns the final session snapshot once this search finishes or is
    /// superseded; live progress is available via [`Self::subscribe`].
    pub async fn start_with_device_location(&self) -> SearchSession {
        let session = self.begin();
        if !self.publish(&session) {
            return self.snapshot();
        }
        let located = self.location.current_position().await;
        self.continue_located(session, located).await
    }

    /// Start a search from a manually entered address.
    pub async fn start_with_address(&self, address: &str) -> SearchSession {
        let session = self.begin();
        if !self.publish(&session) {
            return self.snapshot();
        }
        let located = self.location.geocode(address).await;
        self.continue_located(session, located).await
    }

    fn begin(&self) -> SearchSession {
        let id = self.session_seq.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(session = id, "starting search session");
        SearchSession {
            id,
            origin: None,
            display_address: None,
            radius_km: self.config.radius_km,
            results: Vec::new(),
            status: SearchStatus::Locating,
            started_at: Utc::now(),
        }
    }

    async fn continue_located(
        &self,
        mut session: SearchSession,
        located: Result<Coordinate, LocateError>,
    ) -> SearchSession {
        let origin = match located {
            Ok(origin) => origin,
            Err(err) => {
                // Surface the exact classification; the user must know
                // whether to grant permission, retry, or type an address.
                tracing::warn!(session = session.id, error = %err, "location acquisition failed");
                session.status = SearchStatus::Error(SearchFailure::Locate(err));
                self.publish(&session);
                return self.snapshot();
            }
        };

        let display_address = match self.location.reverse_geocode(origin).await {
            Ok(address) => address,
            Err(err) => {
                tracing::debug!(
                    session = session.id,
                    error = %err,
                    "reverse geocoding failed; falling back to raw coordinates"
                );
                origin.display()
            }
        };

        session.origin = Some(origin);
        session.display_address = Some(display_address);
        session.status = SearchStatus::Searching;
        if !self.publish(&session) {
            return self.snapshot();
        }

        let total = self.config.categories.len();
        let (mut results, primary_failures) = self.run_pass(origin, Pass::Primary).await;

        let mut ran_backup = false;
        let mut backup_failures = 0;
        if results.is_empty() {
            tracing::info!(
                session = session.id,
                "primary pass returned nothing; running one-shot backup pass"
            );
            ran_backup = true;
            let (backup_results, failures) = self.run_pass(origin, Pass::Backup).await;
            results = backup_results;
            backup_failures = failures;
        }

        let all_failed =
            total > 0 && primary_failures == total && ran_backup && backup_failures == total;

        if all_failed {
            session.status = SearchStatus::Error(SearchFailure::Provider {
                reason: format!("all {total} category searches failed"),
            });
        } else {
            session.results = sort_by_distance(results);
            session.status = SearchStatus::Done;
            tracing::info!(
                session = session.id,
                count = session.results.len(),
                "search finished"
            );
        }

        self.publish(&session);
        self.snapshot()
    }

    /// Run one search pass: every category's query for `pass`, concurrently.
    ///
    /// Per-category provider failures are logged and absorbed so one bad
    /// category never aborts the others; the failure count lets the caller
    /// detect the everything-failed case.
    async fn run_pass(&self, origin: Coordinate, pass: Pass) -> (Vec<RankedResult>, usize) {
        let radius_km = self.config.radius_km;

        let searches = self.config.categories.iter().map(|cq| {
            let query = match pass {
                Pass::Primary => cq.primary_query.as_str(),
                Pass::Backup => cq.backup_query.as_str(),
            };
            async move {
                match self.places.text_search(origin, radius_km, query).await {
                    Ok(candidates) => {
                        Ok(rank_candidates(cq.category, origin, &candidates, radius_km))
                    }
                    Err(err) => {
                        tracing::warn!(
                            category = %cq.category,
                            query,
                            error = %err,
                            "category search failed; continuing with remaining categories"
                        );
                        Err(err)
                    }
                }
            }
        });

        let outcomes = futures::future::join_all(searches).await;

        let mut merged = Vec::new();
        let mut failures = 0;
        for outcome in outcomes {
            match outcome {
                Ok(ranked) => merged = merge(merged, ranked),
                Err(_) => failures += 1,
            }
        }
        (merged, failures)
    }

    /// Publish a session update unless a later session has taken over.
    ///
    /// The compare-and-swap happens inside the watch channel's write lock,
    /// so observers never see a stale session overwrite a newer one.
    fn publish(&self, session: &SearchSession) -> bool {
        let mut accepted = false;
        self.state.send_if_modified(|current| {
            if session.id < current.id {
                return false;
            }
            *current = session.clone();
            accepted = true;
            true
        });
        if !accepted {
            tracing::debug!(
                session = session.id,
                "discarding update from superseded session"
            );
        }
        accepted
    }
}
