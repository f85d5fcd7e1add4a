//! Position acquisition with a bounded timeout.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use nearaid_core::{Coordinate, LocateError, LocationProvider, PositionSource};

use crate::client::PlacesClient;

/// Resolves the user's position from a device seam plus the geocoding client.
///
/// The device fix is wrapped in a hard timeout; a slow source surfaces as
/// [`LocateError::LocationTimeout`] rather than hanging the search. No
/// retries here — retry policy belongs to the orchestrator.
pub struct GeoPositionProvider<S> {
    source: S,
    geocoder: Arc<PlacesClient>,
    position_timeout: Duration,
}

impl<S: PositionSource> GeoPositionProvider<S> {
    #[must_use]
    pub fn new(source: S, geocoder: Arc<PlacesClient>, position_timeout_secs: u64) -> Self {
        Self {
            source,
            geocoder,
            position_timeout: Duration::from_secs(position_timeout_secs),
        }
    }
}

#[async_trait]
impl<S: PositionSource> LocationProvider for GeoPositionProvider<S> {
    async fn current_position(&self) -> Result<Coordinate, LocateError> {
        match tokio::time::timeout(self.position_timeout, self.source.fresh_fix()).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.position_timeout.as_secs(),
                    "device position fix timed out"
                );
                Err(LocateError::LocationTimeout)
            }
        }
    }

    async fn geocode(&self, address: &str) -> Result<Coordinate, LocateError> {
        self.geocoder.geocode(address).await
    }

    async fn reverse_geocode(&self, coord: Coordinate) -> Result<String, LocateError> {
        self.geocoder.reverse_geocode(coord).await
    }
}

/// A position source with a known, fixed coordinate.
///
/// Stands in for a device fix when the caller already knows where they are
/// (CLI `--lat`/`--lng`); also convenient in tests.
pub struct FixedPositionSource {
    coordinate: Coordinate,
}

impl FixedPositionSource {
    #[must_use]
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl PositionSource for FixedPositionSource {
    async fn fresh_fix(&self) -> Result<Coordinate, LocateError> {
        Ok(self.coordinate)
    }
}

/// A position source for environments with no location capability.
///
/// Always fails with [`LocateError::PositionUnavailable`], pushing the user
/// toward entering an address manually.
pub struct NoPositionSource;

#[async_trait]
impl PositionSource for NoPositionSource {
    async fn fresh_fix(&self) -> Result<Coordinate, LocateError> {
        Err(LocateError::PositionUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_geocoder() -> Arc<PlacesClient> {
        Arc::new(PlacesClient::new("http://127.0.0.1:9", "test-key", 1, "nearaid-test/0.1").unwrap())
    }

    #[tokio::test]
    async fn fixed_source_returns_its_coordinate() {
        let coord = Coordinate::new(37.774_9, -122.419_4);
        let provider = GeoPositionProvider::new(FixedPositionSource::new(coord), test_geocoder(), 10);
        assert_eq!(provider.current_position().await, Ok(coord));
    }

    #[tokio::test]
    async fn no_position_source_is_unavailable() {
        let provider = GeoPositionProvider::new(NoPositionSource, test_geocoder(), 10);
        assert_eq!(
            provider.current_position().await,
            Err(LocateError::PositionUnavailable)
        );
    }

    #[tokio::test]
    async fn slow_source_times_out() {
        struct SlowSource;

        #[async_trait]
        impl PositionSource for SlowSource {
            async fn fresh_fix(&self) -> Result<Coordinate, LocateError> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(Coordinate::new(0.0, 0.0))
            }
        }

        // A zero-second deadline elapses on the first pending poll.
        let provider = GeoPositionProvider::new(SlowSource, test_geocoder(), 0);
        assert_eq!(
            provider.current_position().await,
            Err(LocateError::LocationTimeout)
        );
    }
}
