//! Domain types for nearby-resource search.

use serde::{Deserialize, Serialize};

use crate::categories::SearchCategory;

/// A geographic point. Immutable value type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Human-readable fallback when no street address is available.
    ///
    /// Six decimal places (~0.1 m), matching what users see when reverse
    /// geocoding fails.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// A raw place record from the external search provider.
///
/// The coordinate may be absent on malformed provider data; such candidates
/// cannot be ranked and are dropped before distance filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub name: String,
    pub formatted_address: String,
    pub coordinate: Option<Coordinate>,
    pub rating: Option<f64>,
    pub open_now: Option<bool>,
    pub phone: Option<String>,
}

/// A candidate that passed radius validation and carries its computed
/// distance from the search origin. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    pub name: String,
    pub address: String,
    pub category: SearchCategory,
    pub distance_km: f64,
    pub rating: Option<f64>,
    pub open_now: Option<bool>,
    pub phone: Option<String>,
}
