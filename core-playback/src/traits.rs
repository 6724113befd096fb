//! # Playback Host Seams
//!
//! The controller owns only the session state machine and lifecycle. The
//! output transport and the adaptive-streaming engine (manifest parsing,
//! segment fetching, bitrate switching) are host capabilities behind these
//! traits, never reimplemented here.

use async_trait::async_trait;
use bridge_traits::error::BridgeError;

/// A fault reported by the adaptive layer during streaming.
///
/// Only faults flagged fatal may change session state; everything else is
/// observed and logged.
#[derive(Debug, Clone)]
pub struct StreamFault {
    pub fatal: bool,
    pub detail: String,
}

impl StreamFault {
    pub fn fatal(detail: impl Into<String>) -> Self {
        Self {
            fatal: true,
            detail: detail.into(),
        }
    }

    pub fn transient(detail: impl Into<String>) -> Self {
        Self {
            fatal: false,
            detail: detail.into(),
        }
    }
}

/// The host's audio output.
#[async_trait]
pub trait MediaTransport: Send + Sync {
    /// Point the output at a URL it can play directly.
    async fn set_source(&self, url: &str) -> Result<(), BridgeError>;

    async fn play(&self) -> Result<(), BridgeError>;

    async fn pause(&self) -> Result<(), BridgeError>;

    async fn seek_to(&self, position_seconds: f64) -> Result<(), BridgeError>;

    /// Whether the output can play the adaptive container format without
    /// an engine (some platforms demux segmented streams natively).
    fn supports_adaptive_natively(&self) -> bool;
}

/// The host's adaptive-streaming engine.
#[async_trait]
pub trait AdaptiveEngine: Send + Sync {
    /// Whether the engine can run in this environment at all.
    fn is_supported(&self) -> bool;

    /// Attach an adaptive session for `url` to the output transport.
    /// The returned handle owns the engine-side resources.
    async fn attach(
        &self,
        url: &str,
        transport: &dyn MediaTransport,
    ) -> Result<Box<dyn AdaptiveHandle>, BridgeError>;
}

/// One attached adaptive session.
#[async_trait]
pub trait AdaptiveHandle: Send + Sync {
    /// Resolves once the manifest has been retrieved and parsed and the
    /// stream is ready to play. An `Err` is a fatal manifest failure;
    /// transient retrieval errors are retried inside the engine.
    async fn await_manifest(&self) -> Result<(), StreamFault>;

    /// Release all engine-side resources for this session. Idempotent.
    fn detach(&self);
}
