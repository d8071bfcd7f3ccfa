//! Fetch errors surfaced to the resolution boundary.

use thiserror::Error;

/// Failure modes of an archive fetch.
///
/// "No data for this range" is not an error; the client signals it with
/// `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-success HTTP response with the archive's own reason string.
    #[error("archive returned {status}: {reason}")]
    Api { status: u16, reason: String },

    /// Network unreachable, timeout, or other transport failure.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("malformed archive response: {0}")]
    Malformed(String),
}
