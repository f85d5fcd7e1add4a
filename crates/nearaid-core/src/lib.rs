//! Shared domain types, configuration, and provider seams for nearaid.

pub mod app_config;
pub mod categories;
pub mod config;
pub mod error;
pub mod provider;
pub mod session;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use categories::{load_categories, CategoryQueries, SearchCategory};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, LocateError, PlacesError};
pub use provider::{LocationProvider, PlaceSearch, PositionSource};
pub use session::{SearchFailure, SearchSession, SearchStatus};
pub use types::{Coordinate, PlaceCandidate, RankedResult};
