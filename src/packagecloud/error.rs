//! Error types exposed by the packagecloud client layer.

use thiserror::Error;

/// Errors surfaced while configuring the client or talking to packagecloud.
///
/// HTTP status failures are not represented here: the paginated fetcher logs
/// them and returns whatever it collected. Only failures the fetcher cannot
/// recover from locally reach the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// Networking failed while calling packagecloud, including timeouts.
    #[error("network error talking to packagecloud: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A successful response carried a body that could not be decoded.
    #[error("packagecloud response could not be decoded: {message}")]
    Decode {
        /// Decoder error detail.
        message: String,
    },

    /// The API base or a resource URL could not be built.
    #[error("packagecloud URL is invalid: {message}")]
    InvalidUrl {
        /// URL parser error detail.
        message: String,
    },

    /// A package filter pattern is not a valid regular expression.
    #[error("invalid package pattern: {message}")]
    InvalidPattern {
        /// Regex compiler error detail.
        message: String,
    },

    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
