//! # Catalog Error Types

use thiserror::Error;

/// Errors that can occur while fetching or resolving catalog content.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog or episode listing fetch failed. Absorbed at the
    /// [`CatalogStore`](crate::store::CatalogStore) boundary: callers of
    /// `load` see an empty sequence, never this error.
    #[error("Catalog fetch failed: {0}")]
    Fetch(String),

    /// Response body could not be decoded into catalog records.
    #[error("Catalog response decode failed: {0}")]
    Decode(String),

    /// No playable URL could be obtained for a record. Always surfaced to
    /// the caller: playback cannot proceed without a source.
    #[error("No playable source for content '{content_id}'")]
    UnresolvedSource { content_id: String },

    /// Configuration rejected by validation.
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),
}

impl CatalogError {
    /// Returns `true` if this error must abort a pending playback attempt.
    pub fn is_unresolved_source(&self) -> bool {
        matches!(self, CatalogError::UnresolvedSource { .. })
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
