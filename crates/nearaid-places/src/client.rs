//! HTTP client for the place-search and geocoding endpoints.
//!
//! One provider serves both concerns: `place/textsearch/json` for proximity
//! queries and `geocode/json` for forward/reverse geocoding. The base URL is
//! injectable so tests can point the client at a local mock server.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use nearaid_core::{Coordinate, LocateError, PlaceCandidate, PlaceSearch, PlacesError};

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Client for the place provider's text-search and geocoding APIs.
///
/// Holds a configured `reqwest::Client` with request timeout and user-agent.
/// No internal retries; retry and fallback policy belong to the orchestrator.
pub struct PlacesClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PlacesClient {
    /// Creates a `PlacesClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, PlacesError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .map_err(transport)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Resolve a free-text address to a coordinate.
    ///
    /// # Errors
    ///
    /// - [`LocateError::AddressNotFound`] — provider returned zero matches.
    /// - [`LocateError::Provider`] — transport failure, non-OK provider
    ///   status, or a malformed response.
    pub async fn geocode(&self, address: &str) -> Result<Coordinate, LocateError> {
        let url = format!("{}/geocode/json", self.base_url);
        let response: GeocodeResponse = self
            .client
            .get(&url)
            .query(&[("address", address), ("key", &self.api_key)])
            .send()
            .await
            .map_err(|e| LocateError::Provider {
                reason: e.to_string(),
            })?
            .json()
            .await
            .map_err(|e| LocateError::Provider {
                reason: format!("malformed geocode response: {e}"),
            })?;

        // Denied/quota statuses also ship an empty results array; classify
        // by status before treating emptiness as "no such address".
        if response.status != STATUS_OK && response.status != STATUS_ZERO_RESULTS {
            return Err(LocateError::Provider {
                reason: format!("geocode status {}", response.status),
            });
        }
        if response.status == STATUS_ZERO_RESULTS || response.results.is_empty() {
            return Err(LocateError::AddressNotFound {
                query: address.to_string(),
            });
        }

        let first = &response.results[0];
        let location = first
            .geometry
            .as_ref()
            .and_then(|g| g.location)
            .ok_or_else(|| LocateError::Provider {
                reason: "geocode result missing geometry".to_string(),
            })?;

        tracing::debug!(address, latitude = location.lat, longitude = location.lng, "geocoded address");
        Ok(Coordinate::new(location.lat, location.lng))
    }

    /// Best-effort human-readable address for a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::Provider`] on any failure; callers fall back to
    /// [`Coordinate::display`] rather than propagating.
    pub async fn reverse_geocode(&self, coord: Coordinate) -> Result<String, LocateError> {
        let url = format!("{}/geocode/json", self.base_url);
        let latlng = format!("{},{}", coord.latitude, coord.longitude);
        let response: GeocodeResponse = self
            .client
            .get(&url)
            .query(&[("latlng", latlng.as_str()), ("key", &self.api_key)])
            .send()
            .await
            .map_err(|e| LocateError::Provider {
                reason: e.to_string(),
            })?
            .json()
            .await
            .map_err(|e| LocateError::Provider {
                reason: format!("malformed reverse geocode response: {e}"),
            })?;

        if response.status != STATUS_OK {
            return Err(LocateError::Provider {
                reason: format!("reverse geocode status {}", response.status),
            });
        }

        response
            .results
            .first()
            .and_then(|r| r.formatted_address.clone())
            .ok_or_else(|| LocateError::Provider {
                reason: "reverse geocode result missing formatted address".to_string(),
            })
    }
}

#[async_trait]
impl PlaceSearch for PlacesClient {
    async fn text_search(
        &self,
        origin: Coordinate,
        radius_km: f64,
        query: &str,
    ) -> Result<Vec<PlaceCandidate>, PlacesError> {
        let url = format!("{}/place/textsearch/json", self.base_url);
        let location = format!("{},{}", origin.latitude, origin.longitude);
        let radius_m = format!("{:.0}", radius_km * 1000.0);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("query", query),
                ("location", location.as_str()),
                ("radius", radius_m.as_str()),
                ("key", &self.api_key),
            ])
            .send()
            .await
            .map_err(transport)?;

        let http_status = response.status();
        if !http_status.is_success() {
            return Err(PlacesError::Status {
                status: format!("HTTP {}", http_status.as_u16()),
            });
        }

        let body: TextSearchResponse =
            response.json().await.map_err(|e| PlacesError::Decode {
                reason: e.to_string(),
            })?;

        match body.status.as_str() {
            STATUS_OK => {}
            STATUS_ZERO_RESULTS => {
                tracing::debug!(query, "text search returned zero results");
                return Ok(vec![]);
            }
            other => {
                let status = match &body.error_message {
                    Some(msg) => format!("{other} ({msg})"),
                    None => other.to_string(),
                };
                return Err(PlacesError::Status { status });
            }
        }

        let candidates = body
            .results
            .into_iter()
            .filter_map(place_to_candidate)
            .collect::<Vec<_>>();

        tracing::debug!(query, count = candidates.len(), "text search succeeded");
        Ok(candidates)
    }
}

fn place_to_candidate(place: PlaceResult) -> Option<PlaceCandidate> {
    let name = place.name?.trim().to_string();
    if name.is_empty() {
        return None;
    }

    Some(PlaceCandidate {
        name,
        formatted_address: place.formatted_address.unwrap_or_default(),
        coordinate: place
            .geometry
            .and_then(|g| g.location)
            .map(|l| Coordinate::new(l.lat, l.lng)),
        rating: place.rating,
        open_now: place.opening_hours.and_then(|h| h.open_now),
        phone: place.formatted_phone_number,
    })
}

fn transport(err: reqwest::Error) -> PlacesError {
    PlacesError::Transport {
        reason: err.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Provider response models
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    name: Option<String>,
    formatted_address: Option<String>,
    geometry: Option<Geometry>,
    rating: Option<f64>,
    opening_hours: Option<OpeningHours>,
    formatted_phone_number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: Option<String>,
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct OpeningHours {
    open_now: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: Option<&str>, lat: Option<f64>) -> PlaceResult {
        PlaceResult {
            name: name.map(str::to_string),
            formatted_address: Some("1 Main St".to_string()),
            geometry: lat.map(|lat| Geometry {
                location: Some(LatLng { lat, lng: -122.0 }),
            }),
            rating: Some(4.2),
            opening_hours: Some(OpeningHours {
                open_now: Some(true),
            }),
            formatted_phone_number: None,
        }
    }

    #[test]
    fn candidate_mapping_keeps_valid_place() {
        let candidate = place_to_candidate(place(Some("Hope Shelter"), Some(37.0))).unwrap();
        assert_eq!(candidate.name, "Hope Shelter");
        assert_eq!(candidate.formatted_address, "1 Main St");
        assert!(candidate.coordinate.is_some());
        assert_eq!(candidate.open_now, Some(true));
    }

    #[test]
    fn candidate_mapping_drops_nameless_place() {
        assert!(place_to_candidate(place(None, Some(37.0))).is_none());
        assert!(place_to_candidate(place(Some("   "), Some(37.0))).is_none());
    }

    #[test]
    fn candidate_mapping_keeps_place_without_geometry() {
        // Coordinate stays None; the aggregator drops it before ranking.
        let candidate = place_to_candidate(place(Some("No Geometry"), None)).unwrap();
        assert!(candidate.coordinate.is_none());
    }
}
