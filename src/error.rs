//! Failure taxonomy shared across the engine, the HTTP client, and config.
use thiserror::Error;

/// Errors the tracker distinguishes by name. Everything else travels as
/// `anyhow::Error` with context attached at the call site.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A remote endpoint answered with a non-success HTTP status.
    ///
    /// For transaction pagination this ends the current pass cleanly
    /// (already-merged pages survive); for price lookups it propagates.
    #[error("remote endpoint returned status {status}")]
    NetworkFailure {
        /// The HTTP status code the endpoint returned.
        status: u16,
    },

    /// The price payload was missing, empty, or not a number.
    #[error("price unavailable: {reason}")]
    PriceUnavailable {
        /// What was wrong with the payload.
        reason: String,
    },

    /// The tracker was started without a usable configuration.
    /// Raised before any I/O is attempted.
    #[error("configuration error: {reason}")]
    Configuration {
        /// What is missing or invalid.
        reason: String,
    },
}
