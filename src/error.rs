//! Error type shared by every fallible entry point of the crate.

use thiserror::Error;

/// Errors raised while validating inputs or configuration.
///
/// These are caller errors: every operation in the crate is a pure
/// computation, so nothing here is retryable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    /// A coordinate was NaN or infinite.
    #[error("non-finite coordinate ({lat}, {lon}) for {what}")]
    NonFiniteCoordinate {
        /// Which location was rejected (`"depot"` or a point id).
        what: String,
        /// Latitude as given.
        lat: f64,
        /// Longitude as given.
        lon: f64,
    },

    /// A demand quantity was negative or non-finite.
    #[error("invalid quantity {quantity} for point {id}")]
    InvalidQuantity {
        /// Point id.
        id: usize,
        /// Quantity as given.
        quantity: f64,
    },

    /// Parallel input sequences had different lengths.
    #[error("got {locations} locations but {quantities} quantities")]
    MismatchedCounts {
        /// Number of locations supplied.
        locations: usize,
        /// Number of quantities supplied.
        quantities: usize,
    },

    /// An order referenced an index outside the active point set.
    #[error("order index {index} out of range for {len} points")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Number of points available.
        len: usize,
    },

    /// An order visited the same index more than once.
    #[error("order visits index {0} more than once")]
    DuplicateIndex(usize),

    /// A configuration value is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RoutingError>;
