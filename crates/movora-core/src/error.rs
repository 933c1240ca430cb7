use movora_sources::TransportError;
use thiserror::Error;

/// Banner text shown when the active list request fails
pub const LIST_ERROR_MESSAGE: &str = "Failed to fetch movies. Please try again.";

/// Shown inside the detail view when the detail/credits pair cannot be joined
pub const DETAIL_UNAVAILABLE_MESSAGE: &str = "Movie details are unavailable.";

#[derive(Debug, Error)]
pub enum DetailError {
    /// One (or both) of the detail sub-requests failed. The summary is still usable.
    #[error("movie details unavailable: {0}")]
    Unavailable(#[from] TransportError),
}
