use thiserror::Error;

/// Failures a listing source can surface. All of them are terminal for the
/// triggering request; there is no retry layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested property identifier does not exist.
    #[error("property {0} not found")]
    NotFound(String),

    /// Network or decoding failure talking to the listings API.
    #[error("listings request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered, but the payload is missing the expected
    /// structure.
    #[error("invalid listings response: {0}")]
    InvalidResponse(String),
}
