//! # Source Resolver
//!
//! Maps a selected leaf record to a playable media URL. Resolution order:
//! precomputed delivery URL on the record, CDN join of the storage key,
//! then an on-demand request to the playback endpoint. A record that
//! cannot be resolved is a hard error; playback never starts without a
//! source.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::client::CatalogClient;
use crate::error::{CatalogError, Result};
use crate::models::ContentRecord;

/// How a resolved URL should be handed to the output transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportKind {
    /// Plain media object; the transport plays it directly.
    Native,
    /// Segmented manifest-driven delivery (`.m3u8`).
    Adaptive,
}

impl TransportKind {
    /// Infer the transport from the URL suffix. Query strings are ignored.
    pub fn from_url(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        if path.to_ascii_lowercase().ends_with(".m3u8") {
            TransportKind::Adaptive
        } else {
            TransportKind::Native
        }
    }
}

/// A playable source for one catalog record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub url: String,
    pub transport: TransportKind,
}

impl ResolvedSource {
    fn from_url(url: String) -> Self {
        let transport = TransportKind::from_url(&url);
        Self { url, transport }
    }
}

/// Resolves catalog records into playable sources.
#[derive(Clone)]
pub struct SourceResolver {
    client: CatalogClient,
}

impl SourceResolver {
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }

    /// Resolve a record to a playable URL and transport.
    ///
    /// A record with a precomputed `media_url` resolves identically on
    /// every call without touching the network.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnresolvedSource`] when no precomputed URL
    /// exists, no CDN base is configured, and the playback request fails
    /// or answers without a URL.
    #[instrument(skip(self), fields(content_id = %record.content_id))]
    pub async fn resolve(&self, record: &ContentRecord) -> Result<ResolvedSource> {
        if let Some(url) = record.media_url.as_deref().filter(|u| !u.is_empty()) {
            debug!("Resolved from precomputed media URL");
            return Ok(ResolvedSource::from_url(url.to_string()));
        }

        if let Some(cdn) = &self.client.config().cdn_base_url {
            if !record.media_key.is_empty() {
                let url = format!(
                    "{}/{}",
                    cdn.trim_end_matches('/'),
                    record.media_key.trim_start_matches('/')
                );
                debug!("Resolved by joining media key onto CDN base");
                return Ok(ResolvedSource::from_url(url));
            }
        }

        match self.client.request_playback_url(&record.content_id).await {
            Ok(Some(url)) => {
                debug!("Resolved via playback endpoint");
                Ok(ResolvedSource::from_url(url))
            }
            Ok(None) => Err(CatalogError::UnresolvedSource {
                content_id: record.content_id.to_string(),
            }),
            Err(e) => {
                debug!(error = %e, "Playback endpoint request failed");
                Err(CatalogError::UnresolvedSource {
                    content_id: record.content_id.to_string(),
                })
            }
        }
    }
}
