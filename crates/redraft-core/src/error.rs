//! Session-level error types.

use thiserror::Error;

/// Errors from applying transformation results to a session.
///
/// Fragment-not-found is deliberately absent: a missing fragment is a
/// per-entry skip reported in `ApplyReport`, never an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    /// A transformation batch is already pending accept/reject. New
    /// rounds are blocked until the user decides.
    #[error("a transformation batch is already pending")]
    BatchPending,

    /// The batch was produced against an older revision of the document;
    /// the user edited it while the transformation was in flight. The
    /// caller discards the batch silently.
    #[error("transformation batch is stale, the document changed while it was in flight")]
    StaleBatch,
}
