//! Result aggregation: ranking, merging, deduplication, sorting, filtering.

use std::collections::HashSet;

use sha2::{Digest, Sha256};

use nearaid_core::{Coordinate, PlaceCandidate, RankedResult, SearchCategory};

use crate::distance::distance_km;

/// Rank raw candidates for one category against the search origin.
///
/// Candidates without a coordinate cannot be ranked and are dropped, as are
/// candidates beyond `radius_km`. Every returned result satisfies
/// `distance_km <= radius_km`.
#[must_use]
pub fn rank_candidates(
    category: SearchCategory,
    origin: Coordinate,
    candidates: &[PlaceCandidate],
    radius_km: f64,
) -> Vec<RankedResult> {
    candidates
        .iter()
        .filter_map(|candidate| {
            let Some(coordinate) = candidate.coordinate else {
                tracing::debug!(name = %candidate.name, "dropping candidate without coordinate");
                return None;
            };

            let distance = distance_km(origin, coordinate);
            if distance > radius_km {
                return None;
            }

            // An address-less place borrows its coordinate as the address, so
            // two same-name places without addresses keep distinct dedup keys.
            let address = if candidate.formatted_address.trim().is_empty() {
                coordinate.display()
            } else {
                candidate.formatted_address.clone()
            };

            Some(RankedResult {
                name: candidate.name.clone(),
                address,
                category,
                distance_km: distance,
                rating: candidate.rating,
                open_now: candidate.open_now,
                phone: candidate.phone.clone(),
            })
        })
        .collect()
}

/// Deduplication key for a result: SHA-256 over the case-normalized
/// (name, address) pair. The same establishment returned by a primary and a
/// backup query hashes identically.
#[must_use]
pub fn result_key(name: &str, address: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.trim().to_lowercase().as_bytes());
    hasher.update(b"|");
    hasher.update(address.trim().to_lowercase().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Concatenate `incoming` onto `existing`, dropping duplicates.
///
/// First occurrence wins; relative order is preserved.
#[must_use]
pub fn merge(existing: Vec<RankedResult>, incoming: Vec<RankedResult>) -> Vec<RankedResult> {
    let mut seen: HashSet<String> = existing
        .iter()
        .map(|r| result_key(&r.name, &r.address))
        .collect();

    let mut merged = existing;
    for result in incoming {
        if seen.insert(result_key(&result.name, &result.address)) {
            merged.push(result);
        }
    }
    merged
}

/// Sort ascending by distance; ties broken by name for determinism.
#[must_use]
pub fn sort_by_distance(mut results: Vec<RankedResult>) -> Vec<RankedResult> {
    results.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.name.cmp(&b.name))
    });
    results
}

/// Non-destructive category filter; the input sequence is left untouched.
#[must_use]
pub fn filter_by_category(results: &[RankedResult], category: SearchCategory) -> Vec<RankedResult> {
    results
        .iter()
        .filter(|r| r.category == category)
        .cloned()
        .collect()
}
