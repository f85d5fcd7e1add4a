use thiserror::Error;

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read categories file {path}: {source}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse categories file: {0}")]
    CategoriesFileParse(#[from] serde_yaml::Error),

    #[error("configuration validation failed: {0}")]
    Validation(String),
}

/// Failures while resolving the user's position.
///
/// Each variant is user-actionable and must be surfaced verbatim: the user
/// needs to know whether to grant permission, retry, or type an address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("device position unavailable")]
    PositionUnavailable,

    #[error("timed out waiting for a device position fix")]
    LocationTimeout,

    #[error("no match found for address \"{query}\"")]
    AddressNotFound { query: String },

    #[error("location provider error: {reason}")]
    Provider { reason: String },
}

/// Failures from the place-search provider.
///
/// Zero matches is NOT an error; it is a successful empty result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacesError {
    #[error("transport error querying place provider: {reason}")]
    Transport { reason: String },

    #[error("place provider returned status {status}")]
    Status { status: String },

    #[error("malformed place provider response: {reason}")]
    Decode { reason: String },
}
