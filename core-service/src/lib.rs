//! Core service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (HTTP, media
//! transport, adaptive engine, identity gate) into the shared core and
//! exposes the browse and playback operations a shell actually calls.
//! Desktop apps typically enable the `desktop-shims` feature, which pulls
//! in the `bridge-desktop` HTTP client for [`bootstrap_desktop`].

pub mod error;
pub mod logging;

pub use error::{CoreError, Result};
#[cfg(not(target_arch = "wasm32"))]
pub use logging::init_logging;
pub use logging::{LogFormat, LoggingConfig};

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use bridge_traits::http::HttpClient;
use core_catalog::{
    CatalogClient, CatalogConfig, CatalogStore, Category, ContentRecord, SourceResolver,
};
use core_navigation::{NavView, NavigationConfig, Navigator};
use core_playback::{
    AdaptiveEngine, MediaTransport, PlaybackConfig, PlaybackController, SessionId,
};

/// External session check gating all browsing and playback.
///
/// A `false` answer means the host should route the user to its
/// onboarding flow; the core only refuses the action.
#[async_trait]
pub trait AccessGate: Send + Sync {
    async fn is_authenticated(&self) -> bool;
}

/// Top-level configuration for the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
}

impl CoreConfig {
    pub fn new(catalog: CatalogConfig) -> Self {
        Self {
            catalog,
            navigation: NavigationConfig::default(),
            playback: PlaybackConfig::default(),
        }
    }
}

/// Aggregated handle to all host dependencies the core requires.
pub struct CoreDependencies {
    pub http_client: Arc<dyn HttpClient>,
    pub media_transport: Arc<dyn MediaTransport>,
    pub adaptive_engine: Arc<dyn AdaptiveEngine>,
    pub access_gate: Arc<dyn AccessGate>,
}

impl CoreDependencies {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        media_transport: Arc<dyn MediaTransport>,
        adaptive_engine: Arc<dyn AdaptiveEngine>,
        access_gate: Arc<dyn AccessGate>,
    ) -> Self {
        Self {
            http_client,
            media_transport,
            adaptive_engine,
            access_gate,
        }
    }
}

/// Primary façade exposed to host applications.
pub struct CoreService {
    client: CatalogClient,
    resolver: SourceResolver,
    navigator: tokio::sync::Mutex<Navigator>,
    player: Arc<PlaybackController>,
    gate: Arc<dyn AccessGate>,
}

impl CoreService {
    /// Create a new service from the provided dependencies.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog or playback configuration is
    /// invalid.
    pub fn new(deps: CoreDependencies, config: CoreConfig) -> Result<Self> {
        let client = CatalogClient::new(deps.http_client, config.catalog)?;
        let store = Arc::new(CatalogStore::new(client.clone()));
        let resolver = SourceResolver::new(client.clone());
        let navigator = Navigator::new(Arc::clone(&store), config.navigation);
        let player = PlaybackController::new(
            deps.media_transport,
            deps.adaptive_engine,
            config.playback,
        )?;

        Ok(Self {
            client,
            resolver,
            navigator: tokio::sync::Mutex::new(navigator),
            player: Arc::new(player),
            gate: deps.access_gate,
        })
    }

    async fn authorize(&self) -> Result<()> {
        if self.gate.is_authenticated().await {
            Ok(())
        } else {
            debug!("Access gate rejected the request");
            Err(CoreError::NotAuthenticated)
        }
    }

    /// List the categories for the root grid.
    ///
    /// Falls back to the built-in category set when the listing endpoint
    /// fails, so the grid always renders.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.authorize().await?;
        match self.client.get_categories().await {
            Ok(categories) if !categories.is_empty() => Ok(categories),
            Ok(_) => Ok(Category::ALL.to_vec()),
            Err(e) => {
                warn!(error = %e, "Category listing failed, using built-in set");
                Ok(Category::ALL.to_vec())
            }
        }
    }

    /// Enter a category and return its first-level grouping view.
    pub async fn browse_category(&self, category: Category) -> Result<NavView> {
        self.authorize().await?;
        Ok(self.navigator.lock().await.select_category(category).await)
    }

    /// Descend one level by the selected item.
    pub async fn browse_select(&self, value: &str) -> Result<NavView> {
        self.authorize().await?;
        Ok(self.navigator.lock().await.select_item(value)?)
    }

    /// Ascend one level.
    pub async fn browse_back(&self) -> Result<NavView> {
        self.authorize().await?;
        Ok(self.navigator.lock().await.go_back())
    }

    /// Return to the category grid.
    pub async fn browse_home(&self) -> Result<NavView> {
        self.authorize().await?;
        Ok(self.navigator.lock().await.go_home())
    }

    /// Jump to a breadcrumb prefix of the given depth.
    pub async fn browse_jump(&self, depth: usize) -> Result<NavView> {
        self.authorize().await?;
        Ok(self.navigator.lock().await.jump_to(depth))
    }

    /// Current breadcrumb bar text, e.g. `FILM SONGS > VOL1`.
    pub async fn breadcrumb(&self) -> String {
        self.navigator.lock().await.path().to_string()
    }

    /// Resolve an episode and start playing it.
    ///
    /// Resolution happens before the current session is touched: a record
    /// that cannot be resolved leaves whatever is playing untouched and no
    /// new session is ever created. On success the prior session is closed
    /// and the new one loaded.
    pub async fn play_episode(&self, record: &ContentRecord) -> Result<SessionId> {
        self.authorize().await?;
        let source = self.resolver.resolve(record).await?;
        self.player.close();
        Ok(self.player.load(record.clone(), source).await?)
    }

    /// The playback controller, for transport controls and the host's
    /// time-update and stream-event signals.
    pub fn player(&self) -> Arc<PlaybackController> {
        Arc::clone(&self.player)
    }
}

/// Convenience bootstrapper for desktop hosts: builds the bundled
/// `reqwest`-backed HTTP client and wires it in with the host's media
/// capabilities.
#[cfg(all(feature = "desktop-shims", not(target_arch = "wasm32")))]
pub fn bootstrap_desktop(
    config: CoreConfig,
    media_transport: Arc<dyn MediaTransport>,
    adaptive_engine: Arc<dyn AdaptiveEngine>,
    access_gate: Arc<dyn AccessGate>,
) -> Result<CoreService> {
    let http_client = Arc::new(bridge_desktop::ReqwestHttpClient::new());
    CoreService::new(
        CoreDependencies::new(http_client, media_transport, adaptive_engine, access_gate),
        config,
    )
}
