use std::time::Duration;
use thiserror::Error;

use crate::session::SessionStatus;

#[derive(Error, Debug)]
pub enum PlaybackError {
    /// The environment can neither run the adaptive engine nor play the
    /// adaptive container natively. Not retried automatically.
    #[error("Stream format is not supported in this environment")]
    CapabilityUnsupported,

    /// The adaptive layer reported an unrecoverable failure. Requires an
    /// explicit `close` and a user-initiated reload.
    #[error("Fatal stream error: {0}")]
    FatalStream(String),

    /// The manifest did not become ready within the configured bound.
    #[error("Manifest retrieval timed out after {0:?}")]
    ManifestTimeout(Duration),

    /// `load` was called while a session sits in a state that requires an
    /// explicit `close` first.
    #[error("Session in state {0:?} must be closed before loading")]
    SessionNotClosed(SessionStatus),

    #[error("Invalid playback configuration: {0}")]
    InvalidConfig(String),
}

impl PlaybackError {
    /// `true` for errors a user-initiated reload may fix. Capability
    /// failures are environmental and will recur.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, PlaybackError::CapabilityUnsupported)
    }
}

pub type Result<T> = std::result::Result<T, PlaybackError>;
