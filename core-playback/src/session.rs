//! # Playback Session
//!
//! The single mutable record of what is (or was) playing. At most one
//! session's resources are live at any time; the controller enforces this.

use core_catalog::{ContentRecord, ResolvedSource};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of one `load` attempt. Compared to discard late-arriving
/// completions of a superseded session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session lifecycle status.
///
/// `Error` and `Ended` are sticky: a new `load` is rejected until an
/// explicit `close` returns the controller to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Idle,
    Loading,
    Playing,
    Paused,
    Error,
    Ended,
}

/// One streaming session over a resolved source.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    pub id: SessionId,
    pub record: ContentRecord,
    pub source: ResolvedSource,
    pub status: SessionStatus,
    pub position_seconds: f64,
    /// Unknown until the transport reports it.
    pub duration_seconds: Option<f64>,
    pub last_error: Option<String>,
}

impl PlaybackSession {
    pub fn new(record: ContentRecord, source: ResolvedSource) -> Self {
        Self {
            id: SessionId::new(),
            record,
            source,
            status: SessionStatus::Loading,
            position_seconds: 0.0,
            duration_seconds: None,
            last_error: None,
        }
    }

    /// Playback progress as a fraction of the known duration.
    pub fn progress(&self) -> Option<f64> {
        match self.duration_seconds {
            Some(duration) if duration > 0.0 => {
                Some((self.position_seconds / duration).clamp(0.0, 1.0))
            }
            _ => None,
        }
    }
}

/// Format a position in seconds as `m:ss` for display. Non-finite or
/// negative input renders as `0:00` rather than propagating NaN.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
