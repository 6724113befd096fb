//! # Catalog Store
//!
//! Per-category in-memory cache of the flat content list. The store is the
//! fetch-failure boundary: `load` degrades to an empty sequence on any
//! transport or decode error, so navigation treats "no content" and
//! "fetch failed" identically and never crashes on a flaky backend.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::client::CatalogClient;
use crate::models::{Category, ContentRecord};

/// Normalized, queryable representation of fetched catalog content.
///
/// Records are held immutably per category for the session; a re-fetch
/// replaces a category's records wholesale, never merges.
pub struct CatalogStore {
    client: CatalogClient,
    cache: RwLock<HashMap<Category, Arc<Vec<ContentRecord>>>>,
}

impl CatalogStore {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch a category's content and replace whatever was cached for it.
    ///
    /// Fails softly: on error the previously cached records (if any) are
    /// left untouched and an empty sequence is returned. Callers must treat
    /// empty as "no content", not as an error.
    pub async fn load(&self, category: Category) -> Arc<Vec<ContentRecord>> {
        match self.client.get_category_content(category).await {
            Ok(records) => {
                debug!(category = %category, count = records.len(), "Loaded category content");
                let records = Arc::new(records);
                self.cache.write().insert(category, Arc::clone(&records));
                records
            }
            Err(e) => {
                warn!(category = %category, error = %e, "Category fetch failed, degrading to empty");
                Arc::new(Vec::new())
            }
        }
    }

    /// Return the cached records for a category, fetching once if absent.
    pub async fn ensure_loaded(&self, category: Category) -> Arc<Vec<ContentRecord>> {
        if let Some(records) = self.cache.read().get(&category) {
            return Arc::clone(records);
        }
        self.load(category).await
    }

    /// Cached records for a category; empty if the category was never
    /// loaded (or its only load failed).
    pub fn records(&self, category: Category) -> Arc<Vec<ContentRecord>> {
        self.cache
            .read()
            .get(&category)
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_loaded(&self, category: Category) -> bool {
        self.cache.read().contains_key(&category)
    }

    /// Replace a category's records wholesale, without a fetch. Lets hosts
    /// seed the store (e.g., from a fixture or a previously serialized
    /// snapshot).
    pub fn replace(&self, category: Category, records: Vec<ContentRecord>) {
        self.cache.write().insert(category, Arc::new(records));
    }

    /// Drop one category's cache so the next `ensure_loaded` re-fetches.
    pub fn invalidate(&self, category: Category) {
        self.cache.write().remove(&category);
    }
}
