//! Error types shared across the planner.

use std::path::PathBuf;

use thiserror::Error;

/// Failure talking to an external mapping service.
///
/// Raised for one call only; nothing cached by earlier calls is affected.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced a usable HTTP response.
    #[error("{endpoint} request failed: {source}")]
    Http {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// The service answered but reported a non-OK status.
    #[error("{endpoint} returned {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Service {
        endpoint: &'static str,
        status: String,
        message: Option<String>,
    },
    /// The body could not be interpreted.
    #[error("unexpected {endpoint} response: {message}")]
    Malformed {
        endpoint: &'static str,
        message: String,
    },
}

/// Why no route could be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("no locations to route")]
    Empty,
    #[error("depot index {depot} is outside a matrix of size {size}")]
    DepotOutOfRange { depot: usize, size: usize },
    #[error("cost matrix is not square (row {row} has {len} entries, expected {size})")]
    NotSquare { row: usize, len: usize, size: usize },
    #[error("location {index} has no known distance to or from any other location")]
    Unreachable { index: usize },
}

/// Problems with the list of places supplied by the user.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("enter at least one location")]
    NoLocations,
    #[error("{count} locations given, at most {max} are supported")]
    TooManyLocations { count: usize, max: usize },
    #[error("failed to read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path} has no `{column}` column")]
    MissingColumn { path: PathBuf, column: &'static str },
}

/// Problems setting up the planner.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API key: set GOOGLE_MAPS_API_KEY or pass --api-key")]
    MissingApiKey,
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Top-level failure of one planning run.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("geocoding failed: {0}")]
    Geocode(#[source] ProviderError),
    #[error("none of the entered locations could be found")]
    NoResolvableLocations,
    #[error("distance matrix unavailable: {0}")]
    Matrix(#[source] ProviderError),
    #[error("failed to generate a route: {0}")]
    Solve(#[from] SolveError),
}
