//! # Playback Controller
//!
//! Owns the session state machine: `Idle -> Loading -> Playing <-> Paused`,
//! with `Error` and `Ended` as sticky outcomes that require an explicit
//! `close` before the next `load`. Protocol negotiation, teardown ordering
//! and stale-completion discard all live here; the transport and the
//! adaptive engine stay behind their seams.

use core_catalog::{ContentRecord, ResolvedSource, TransportKind};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::error::{PlaybackError, Result};
use crate::session::{PlaybackSession, SessionId, SessionStatus};
use crate::traits::{AdaptiveEngine, AdaptiveHandle, MediaTransport, StreamFault};

/// Playback behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Bounded wait for adaptive-manifest retrieval; elapsing is a fatal
    /// error for the loading session.
    ///
    /// Default: 10 seconds.
    #[serde(default = "default_manifest_timeout")]
    pub manifest_timeout: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            manifest_timeout: default_manifest_timeout(),
        }
    }
}

impl PlaybackConfig {
    pub fn validate(&self) -> Result<()> {
        if self.manifest_timeout.is_zero() {
            return Err(PlaybackError::InvalidConfig(
                "manifest_timeout must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_manifest_timeout() -> Duration {
    Duration::from_secs(10)
}

struct ControllerState {
    session: Option<PlaybackSession>,
    /// Engine-side resources of the active adaptive session, if any. The
    /// exclusivity invariant: never more than one live handle.
    handle: Option<Arc<dyn AdaptiveHandle>>,
}

/// Streaming session controller over a host transport and adaptive engine.
pub struct PlaybackController {
    transport: Arc<dyn MediaTransport>,
    engine: Arc<dyn AdaptiveEngine>,
    config: PlaybackConfig,
    state: Mutex<ControllerState>,
}

impl PlaybackController {
    pub fn new(
        transport: Arc<dyn MediaTransport>,
        engine: Arc<dyn AdaptiveEngine>,
        config: PlaybackConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport,
            engine,
            config,
            state: Mutex::new(ControllerState {
                session: None,
                handle: None,
            }),
        })
    }

    /// Current session status; `Idle` when nothing is loaded.
    pub fn status(&self) -> SessionStatus {
        self.state
            .lock()
            .session
            .as_ref()
            .map(|s| s.status)
            .unwrap_or(SessionStatus::Idle)
    }

    /// Snapshot of the active session for observers.
    pub fn session(&self) -> Option<PlaybackSession> {
        self.state.lock().session.clone()
    }

    /// Start a new session for a resolved source.
    ///
    /// Any prior adaptive session is torn down before the new one is
    /// attached. A session sitting in `Error` or `Ended` must be closed
    /// first; in every other state the prior session is superseded.
    ///
    /// # Errors
    ///
    /// [`PlaybackError::SessionNotClosed`] when the prior session requires
    /// an explicit close, [`PlaybackError::CapabilityUnsupported`] when
    /// neither the engine nor the transport can handle an adaptive source,
    /// and fatal stream or timeout errors from the load itself.
    #[instrument(skip(self, record, source), fields(content_id = %record.content_id, transport = ?source.transport))]
    pub async fn load(&self, record: ContentRecord, source: ResolvedSource) -> Result<SessionId> {
        let session_id = {
            let mut state = self.state.lock();
            if let Some(session) = &state.session {
                if matches!(session.status, SessionStatus::Error | SessionStatus::Ended) {
                    return Err(PlaybackError::SessionNotClosed(session.status));
                }
            }
            // Tear down the prior adaptive session before acquiring the
            // new one; at most one handle is ever live.
            if let Some(handle) = state.handle.take() {
                handle.detach();
            }
            let session = PlaybackSession::new(record, source.clone());
            let id = session.id;
            state.session = Some(session);
            id
        };

        debug!(session = %session_id, url = %source.url, "Loading session");
        match source.transport {
            TransportKind::Native => self.load_native(session_id, &source.url).await,
            TransportKind::Adaptive => self.load_adaptive(session_id, &source.url).await,
        }
    }

    async fn load_native(&self, id: SessionId, url: &str) -> Result<SessionId> {
        if let Err(e) = self.transport.set_source(url).await {
            return self.fail_if_current(id, PlaybackError::FatalStream(e.to_string()));
        }
        if let Err(e) = self.transport.play().await {
            return self.fail_if_current(id, PlaybackError::FatalStream(e.to_string()));
        }
        self.mark_if_current(id, SessionStatus::Playing);
        Ok(id)
    }

    async fn load_adaptive(&self, id: SessionId, url: &str) -> Result<SessionId> {
        if !self.engine.is_supported() {
            if self.transport.supports_adaptive_natively() {
                debug!(session = %id, "Engine unavailable, transport demuxes natively");
                return self.load_native(id, url).await;
            }
            return self.fail_if_current(id, PlaybackError::CapabilityUnsupported);
        }

        let handle: Arc<dyn AdaptiveHandle> =
            match self.engine.attach(url, self.transport.as_ref()).await {
                Ok(handle) => Arc::from(handle),
                Err(e) => {
                    return self.fail_if_current(id, PlaybackError::FatalStream(e.to_string()))
                }
            };

        {
            let mut state = self.state.lock();
            if state.session.as_ref().map(|s| s.id) == Some(id) {
                state.handle = Some(Arc::clone(&handle));
            } else {
                // Superseded while attaching; release immediately.
                handle.detach();
                return Ok(id);
            }
        }

        match timeout(self.config.manifest_timeout, handle.await_manifest()).await {
            Ok(Ok(())) => {
                if !self.is_current(id) {
                    debug!(session = %id, "Discarding manifest completion of superseded session");
                    return Ok(id);
                }
                if let Err(e) = self.transport.play().await {
                    return self.fail_if_current(id, PlaybackError::FatalStream(e.to_string()));
                }
                self.mark_if_current(id, SessionStatus::Playing);
                Ok(id)
            }
            Ok(Err(fault)) => self.fail_if_current(id, PlaybackError::FatalStream(fault.detail)),
            Err(_) => self.fail_if_current(
                id,
                PlaybackError::ManifestTimeout(self.config.manifest_timeout),
            ),
        }
    }

    /// Resume a paused session. A no-op unless the session is `Paused`.
    pub async fn play(&self) -> Result<()> {
        let id = {
            let state = self.state.lock();
            match &state.session {
                Some(session) if session.status == SessionStatus::Paused => session.id,
                _ => return Ok(()),
            }
        };
        if let Err(e) = self.transport.play().await {
            return self.fail_if_current(id, PlaybackError::FatalStream(e.to_string()));
        }
        self.mark_if_current(id, SessionStatus::Playing);
        Ok(())
    }

    /// Pause a playing session. A no-op unless the session is `Playing`.
    pub async fn pause(&self) -> Result<()> {
        let id = {
            let state = self.state.lock();
            match &state.session {
                Some(session) if session.status == SessionStatus::Playing => session.id,
                _ => return Ok(()),
            }
        };
        if let Err(e) = self.transport.pause().await {
            return self.fail_if_current(id, PlaybackError::FatalStream(e.to_string()));
        }
        self.mark_if_current(id, SessionStatus::Paused);
        Ok(())
    }

    /// Seek to a fraction of the duration, clamped to `[0, 1]`. A no-op
    /// when nothing is loaded, the duration is unknown, or the fraction is
    /// not a finite number.
    pub async fn seek(&self, fraction: f64) -> Result<()> {
        if !fraction.is_finite() {
            return Ok(());
        }
        let target = {
            let state = self.state.lock();
            match &state.session {
                Some(session) => match session.duration_seconds {
                    Some(duration) if duration.is_finite() && duration > 0.0 => {
                        Some((session.id, fraction.clamp(0.0, 1.0) * duration))
                    }
                    _ => None,
                },
                None => None,
            }
        };
        let Some((id, position)) = target else {
            return Ok(());
        };

        if let Err(e) = self.transport.seek_to(position).await {
            return self.fail_if_current(id, PlaybackError::FatalStream(e.to_string()));
        }
        let mut state = self.state.lock();
        if let Some(session) = state.session.as_mut().filter(|s| s.id == id) {
            session.position_seconds = position;
        }
        Ok(())
    }

    /// Release all session resources and return to `Idle`. Always
    /// succeeds, from any state including `Error`.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if let Some(handle) = state.handle.take() {
            handle.detach();
        }
        if let Some(session) = state.session.take() {
            debug!(session = %session.id, "Closed session");
        }
    }

    /// Ingest a transport time-update signal. The transport drives the
    /// cadence; the controller never polls.
    pub fn handle_time_update(&self, position_seconds: f64, duration_seconds: Option<f64>) {
        let mut state = self.state.lock();
        let Some(session) = state.session.as_mut() else {
            return;
        };
        if !matches!(
            session.status,
            SessionStatus::Playing | SessionStatus::Paused
        ) {
            return;
        }
        if position_seconds.is_finite() && position_seconds >= 0.0 {
            session.position_seconds = position_seconds;
        }
        if let Some(duration) = duration_seconds.filter(|d| d.is_finite() && *d > 0.0) {
            session.duration_seconds = Some(duration);
        }
    }

    /// Ingest the transport's natural-end signal. A spurious signal while
    /// not `Playing` is ignored entirely; the engine resources stay live.
    pub fn handle_ended(&self) {
        let mut state = self.state.lock();
        let playing = state
            .session
            .as_ref()
            .is_some_and(|s| s.status == SessionStatus::Playing);
        if !playing {
            return;
        }
        if let Some(handle) = state.handle.take() {
            handle.detach();
        }
        if let Some(session) = state.session.as_mut() {
            session.status = SessionStatus::Ended;
            debug!(session = %session.id, "Session ended");
        }
    }

    /// Ingest a fault from the adaptive layer. Transient faults are logged
    /// and never change session state; fatal faults transition to `Error`
    /// and release the engine resources. No automatic retry.
    pub fn handle_stream_fault(&self, fault: StreamFault) {
        if !fault.fatal {
            warn!(detail = %fault.detail, "Transient stream fault, continuing");
            return;
        }
        let mut state = self.state.lock();
        if let Some(handle) = state.handle.take() {
            handle.detach();
        }
        if let Some(session) = state.session.as_mut() {
            warn!(session = %session.id, detail = %fault.detail, "Fatal stream fault");
            session.status = SessionStatus::Error;
            session.last_error = Some(fault.detail);
        }
    }

    fn is_current(&self, id: SessionId) -> bool {
        self.state.lock().session.as_ref().map(|s| s.id) == Some(id)
    }

    fn mark_if_current(&self, id: SessionId, status: SessionStatus) {
        let mut state = self.state.lock();
        if let Some(session) = state.session.as_mut().filter(|s| s.id == id) {
            session.status = status;
        }
    }

    /// Record a load failure against the session, unless it has already
    /// been superseded; the error is returned to the caller either way.
    fn fail_if_current<T>(&self, id: SessionId, error: PlaybackError) -> Result<T> {
        let mut state = self.state.lock();
        if state.session.as_ref().map(|s| s.id) == Some(id) {
            if let Some(handle) = state.handle.take() {
                handle.detach();
            }
            if let Some(session) = state.session.as_mut() {
                warn!(session = %id, error = %error, "Session failed");
                session.status = SessionStatus::Error;
                session.last_error = Some(error.to_string());
            }
        }
        Err(error)
    }
}
