//! Error types for page index retrieval.

/// Error while fetching or decoding the page index.
///
/// Never leaves this crate through [`PageIndex`](crate::PageIndex): fetch
/// failures are logged and degrade to an empty page list.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// Server answered with an error status.
    #[error("HTTP error: {status}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
    },

    /// Payload is not valid JSON or has the wrong shape.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}
