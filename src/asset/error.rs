//! Copy error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving and copying referenced media.
///
/// Every variant is fatal: the run aborts on the first error, leaving
/// already-copied files in place (no rollback).
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("cannot read entry file `{0}`")]
    Entry(PathBuf, #[source] std::io::Error),

    /// A direct reference with no literal file and no glob fallback match.
    /// Signals that the build's referenced media is genuinely missing.
    #[error("referenced media not found: {0}")]
    AssetNotFound(String),

    #[error("invalid glob pattern `{0}`")]
    Pattern(String, #[source] glob::PatternError),

    #[error("IO error at `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}
