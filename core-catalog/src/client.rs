//! # Catalog API Client
//!
//! Thin typed layer over the catalog REST API, consumed through the
//! `bridge-traits` HTTP seam. Handles the backend's response quirks
//! (Lambda-proxy double encoding, enveloped collections) in one place so
//! the store and resolver see plain domain types.

use bridge_traits::http::{HttpClient, HttpRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::models::{Category, ContentId, ContentRecord};

#[derive(Serialize)]
struct PlaybackUrlRequest<'a> {
    content_id: &'a str,
}

#[derive(Deserialize)]
struct PlaybackUrlResponse {
    #[serde(default)]
    playback_url: Option<String>,
}

/// Typed client for the catalog REST API.
#[derive(Clone)]
pub struct CatalogClient {
    http: Arc<dyn HttpClient>,
    config: CatalogConfig,
}

impl CatalogClient {
    pub fn new(http: Arc<dyn HttpClient>, config: CatalogConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        let request =
            HttpRequest::get(self.endpoint(path)).timeout(self.config.request_timeout);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| CatalogError::Fetch(e.to_string()))?;

        if !response.is_success() {
            return Err(CatalogError::Fetch(format!(
                "GET {} returned HTTP {}",
                path, response.status
            )));
        }

        let value: Value = response
            .json()
            .map_err(|e| CatalogError::Decode(e.to_string()))?;
        unwrap_envelope(value)
    }

    /// List the known categories (`GET /categories`).
    ///
    /// Unknown category tokens are skipped with a warning rather than
    /// failing the whole listing.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>> {
        let value = self.get_json("categories").await?;
        let tokens: Vec<String> = decode_collection(value, "categories")?;

        let mut categories = Vec::with_capacity(tokens.len());
        for token in tokens {
            match Category::parse(&token) {
                Some(category) => categories.push(category),
                None => warn!(token, "Skipping unknown category token"),
            }
        }

        debug!(count = categories.len(), "Fetched categories");
        Ok(categories)
    }

    /// Fetch the flat content list for one category (`GET /category/{c}`).
    ///
    /// Records are ingested here: composite ids are decomposed once and
    /// malformed records (episodes without a media key) are dropped.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn get_category_content(&self, category: Category) -> Result<Vec<ContentRecord>> {
        let value = self
            .get_json(&format!("category/{}", category.as_str()))
            .await?;
        let records: Vec<ContentRecord> = decode_collection(value, "content")?;
        Ok(self.ingest(records))
    }

    /// Fetch the episode listing for one show (`GET /shows/{id}/episodes`).
    #[instrument(skip(self))]
    pub async fn get_show_episodes(&self, show_id: &str) -> Result<Vec<ContentRecord>> {
        let value = self.get_json(&format!("shows/{}/episodes", show_id)).await?;
        let records: Vec<ContentRecord> = decode_collection(value, "episodes")?;
        Ok(self.ingest(records))
    }

    /// Request a delivery URL for a record without a precomputed one
    /// (`POST /playback { content_id }`).
    ///
    /// Returns `Ok(None)` when the backend answers without a URL; the
    /// resolver turns both that and transport errors into
    /// [`CatalogError::UnresolvedSource`].
    #[instrument(skip(self), fields(content_id = %content_id))]
    pub async fn request_playback_url(&self, content_id: &ContentId) -> Result<Option<String>> {
        let request = HttpRequest::post(self.endpoint("playback"))
            .json(&PlaybackUrlRequest {
                content_id: content_id.as_str(),
            })
            .map_err(|e| CatalogError::Fetch(e.to_string()))?
            .timeout(self.config.request_timeout);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| CatalogError::Fetch(e.to_string()))?;

        if !response.is_success() {
            return Err(CatalogError::Fetch(format!(
                "POST /playback returned HTTP {}",
                response.status
            )));
        }

        let value: Value = response
            .json()
            .map_err(|e| CatalogError::Decode(e.to_string()))?;
        let decoded: PlaybackUrlResponse = serde_json::from_value(unwrap_envelope(value)?)
            .map_err(|e| CatalogError::Decode(e.to_string()))?;

        Ok(decoded.playback_url.filter(|url| !url.is_empty()))
    }

    fn ingest(&self, records: Vec<ContentRecord>) -> Vec<ContentRecord> {
        records
            .into_iter()
            .map(ContentRecord::with_decomposed_path)
            .filter(|record| {
                if record.is_well_formed() {
                    true
                } else {
                    warn!(content_id = %record.content_id, "Dropping episode record without media key");
                    false
                }
            })
            .collect()
    }
}

/// Unwrap the Lambda proxy envelope: some deployments return
/// `{"body": "<json string>"}` with the payload double-encoded.
fn unwrap_envelope(value: Value) -> Result<Value> {
    if let Value::Object(map) = &value {
        if let Some(Value::String(body)) = map.get("body") {
            return serde_json::from_str(body).map_err(|e| {
                CatalogError::Decode(format!("Invalid double-encoded body: {}", e))
            });
        }
    }
    Ok(value)
}

/// Decode a collection that may arrive bare (`[...]`) or enveloped under a
/// named field (`{"content": [...]}`).
fn decode_collection<T: serde::de::DeserializeOwned>(value: Value, field: &str) -> Result<Vec<T>> {
    let collection = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => map
            .remove(field)
            .ok_or_else(|| CatalogError::Decode(format!("Missing '{}' field", field)))?,
        other => {
            return Err(CatalogError::Decode(format!(
                "Expected array or object, got {}",
                other
            )))
        }
    };

    serde_json::from_value(collection).map_err(|e| CatalogError::Decode(e.to_string()))
}
