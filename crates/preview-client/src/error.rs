//! Typed error types for the preview client.
//!
//! Preview failures are reported to the caller's callback and nowhere
//! else: they never touch the document or the generated markup.

/// Preview error conditions.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// The HTTP client could not be constructed from the configuration.
    #[cfg(feature = "http")]
    #[error("failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    /// The request did not complete (connect failure, timeout, etc.).
    #[cfg(feature = "http")]
    #[error("preview request failed: {url}")]
    RequestFailed {
        /// The URL that was attempted.
        url: String,
        /// The underlying HTTP error.
        #[source]
        source: reqwest::Error,
    },

    /// The rendering service answered with a non-success status.
    ///
    /// The body is included because the service reports markup problems
    /// (e.g. an unrenderable barcode payload) as plain-text 4xx responses.
    #[error("rendering service returned HTTP {status}: {body}")]
    Endpoint {
        /// HTTP status code.
        status: u16,
        /// Response body, usually a short plain-text explanation.
        body: String,
    },

    /// An invalid configuration was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
