//! # Playback Module
//!
//! Streaming playback over a resolved media source: protocol negotiation
//! with fallback (adaptive engine, native adaptive demuxing, or error),
//! the session lifecycle state machine, transport controls and
//! time/progress reporting. The host's output transport and
//! adaptive-streaming engine sit behind the seams in [`traits`].

pub mod controller;
pub mod error;
pub mod session;
pub mod traits;

pub use controller::{PlaybackConfig, PlaybackController};
pub use error::{PlaybackError, Result};
pub use session::{format_time, PlaybackSession, SessionId, SessionStatus};
pub use traits::{AdaptiveEngine, AdaptiveHandle, MediaTransport, StreamFault};
