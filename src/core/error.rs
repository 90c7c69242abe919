//! Error kinds surfaced by the section store

use std::path::PathBuf;

/// Errors from section store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No section carries the requested title.
    #[error("page not found: {0}")]
    NotFound(String),

    /// A section-targeted edit hit a notebook without sections.
    #[error("no sections")]
    NoSections,

    /// A section-targeted edit named a title that is not present.
    #[error("section not found: {0}")]
    SectionNotFound(String),

    /// The notebook changed since the caller last read its ETag.
    #[error("etag mismatch: expected {expected}, current {actual}")]
    EtagMismatch { expected: String, actual: String },

    /// Reading, writing or creating the notebook location failed.
    #[error("notebook i/o failed at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
