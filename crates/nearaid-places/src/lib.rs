//! HTTP clients for the external place-search/geocoding provider and the
//! device-position seam.

mod client;
mod position;

pub use client::PlacesClient;
pub use position::{FixedPositionSource, GeoPositionProvider, NoPositionSource};
