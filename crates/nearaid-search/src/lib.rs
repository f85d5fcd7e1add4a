//! Nearby-resource search core: distance computation, result aggregation,
//! and the search orchestrator state machine.

pub mod aggregate;
pub mod distance;
pub mod orchestrator;

pub use aggregate::{filter_by_category, merge, rank_candidates, sort_by_distance};
pub use distance::distance_km;
pub use orchestrator::{SearchConfig, SearchOrchestrator};
