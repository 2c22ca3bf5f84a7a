//! Error types for the asynchronous collaborators.

use std::time::Duration;

use thiserror::Error;

/// Failure of a transformation round. Any one of these fails the whole
/// round; a partial batch is never applied, so the user can simply retry
/// with their selections intact.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransformError {
    /// The transformation backend returned an error.
    #[error("transformation request failed: {0}")]
    Api(String),

    /// The call did not settle within the caller-supplied timeout.
    #[error("transformation request timed out after {0:?}")]
    Timeout(Duration),

    /// The backend answered, but with nothing usable.
    #[error("transformer returned an empty result")]
    EmptyResult,
}

/// Failure of the persistence collaborator. Last write wins, so the only
/// recovery is retrying the save on the next debounce tick.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreError {
    #[error("persistence backend error: {0}")]
    Backend(String),

    #[error("document not found")]
    NotFound,
}
