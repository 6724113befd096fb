use thiserror::Error;

/// Facade-level error taxonomy. The sub-crate variants stay distinct so a
/// host can show a source-resolution failure and a stream failure as
/// different messages.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Core initialization failed: {0}")]
    InitializationFailed(String),

    /// The identity gate rejected a browsing or playback action.
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Catalog error: {0}")]
    Catalog(#[from] core_catalog::CatalogError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] core_navigation::NavigationError),

    #[error("Playback error: {0}")]
    Playback(#[from] core_playback::PlaybackError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
