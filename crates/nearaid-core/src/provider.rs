//! Provider seams.
//!
//! The orchestrator talks to location and place-search providers through
//! these traits so it can be exercised without HTTP or device access.

use async_trait::async_trait;

use crate::error::{LocateError, PlacesError};
use crate::types::{Coordinate, PlaceCandidate};

/// A source of fresh device position fixes.
///
/// Implementations must return a fresh fix, never a cached one. Timeout
/// enforcement belongs to the wrapper, not the source.
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn fresh_fix(&self) -> Result<Coordinate, LocateError>;
}

/// Resolves the user's position, forward and backward.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Acquire the device position with a bounded timeout.
    async fn current_position(&self) -> Result<Coordinate, LocateError>;

    /// Resolve a free-text address to a coordinate.
    async fn geocode(&self, address: &str) -> Result<Coordinate, LocateError>;

    /// Best-effort human-readable address for a coordinate.
    ///
    /// Callers must treat failure as non-fatal and fall back to
    /// [`Coordinate::display`]; reverse geocoding never blocks a search.
    async fn reverse_geocode(&self, coord: Coordinate) -> Result<String, LocateError>;
}

/// Issues one category-scoped proximity query against the place provider.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Run one text query near `origin`.
    ///
    /// Zero matches is a successful empty result, not an error.
    async fn text_search(
        &self,
        origin: Coordinate,
        radius_km: f64,
        query: &str,
    ) -> Result<Vec<PlaceCandidate>, PlacesError>;
}

#[async_trait]
impl<T: PositionSource + ?Sized> PositionSource for Box<T> {
    async fn fresh_fix(&self) -> Result<Coordinate, LocateError> {
        (**self).fresh_fix().await
    }
}

#[async_trait]
impl<T: PlaceSearch + ?Sized> PlaceSearch for std::sync::Arc<T> {
    async fn text_search(
        &self,
        origin: Coordinate,
        radius_km: f64,
        query: &str,
    ) -> Result<Vec<PlaceCandidate>, PlacesError> {
        (**self).text_search(origin, radius_km, query).await
    }
}
