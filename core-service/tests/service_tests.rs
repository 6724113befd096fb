//! Integration tests for the core service façade.
//!
//! A scripted HTTP client stands in for the catalog API and hand-rolled
//! fakes cover the media transport, adaptive engine and identity gate, so
//! the full browse-then-play flow runs end to end without a network.

use async_trait::async_trait;
use bridge_traits::error::BridgeError;
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use bytes::Bytes;
use core_catalog::{CatalogConfig, Category, ContentRecord};
use core_navigation::NavView;
use core_playback::{AdaptiveEngine, AdaptiveHandle, MediaTransport, SessionStatus, StreamFault};
use core_service::{AccessGate, CoreConfig, CoreDependencies, CoreError, CoreService};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// =============================================================================
// Fakes
// =============================================================================

/// Serves canned JSON bodies keyed by a URL fragment; everything else 404s.
#[derive(Default)]
struct ScriptedHttp {
    routes: Mutex<HashMap<String, String>>,
}

impl ScriptedHttp {
    fn route(self, fragment: &str, body: serde_json::Value) -> Self {
        self.routes
            .lock()
            .insert(fragment.to_string(), body.to_string());
        self
    }
}

#[async_trait]
impl HttpClient for ScriptedHttp {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BridgeError> {
        let routes = self.routes.lock();
        let body = routes
            .iter()
            .find(|(fragment, _)| request.url.contains(fragment.as_str()))
            .map(|(_, body)| body.clone());
        match body {
            Some(body) => Ok(HttpResponse {
                status: 200,
                headers: HashMap::new(),
                body: Bytes::from(body),
            }),
            None => Ok(HttpResponse {
                status: 404,
                headers: HashMap::new(),
                body: Bytes::new(),
            }),
        }
    }
}

struct FailingHttp;

#[async_trait]
impl HttpClient for FailingHttp {
    async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, BridgeError> {
        Err(BridgeError::OperationFailed("connection refused".into()))
    }
}

#[derive(Default)]
struct NoopTransport;

#[async_trait]
impl MediaTransport for NoopTransport {
    async fn set_source(&self, _url: &str) -> Result<(), BridgeError> {
        Ok(())
    }
    async fn play(&self) -> Result<(), BridgeError> {
        Ok(())
    }
    async fn pause(&self) -> Result<(), BridgeError> {
        Ok(())
    }
    async fn seek_to(&self, _position_seconds: f64) -> Result<(), BridgeError> {
        Ok(())
    }
    fn supports_adaptive_natively(&self) -> bool {
        false
    }
}

struct ReadyEngine;

#[async_trait]
impl AdaptiveEngine for ReadyEngine {
    fn is_supported(&self) -> bool {
        true
    }
    async fn attach(
        &self,
        _url: &str,
        _transport: &dyn MediaTransport,
    ) -> Result<Box<dyn AdaptiveHandle>, BridgeError> {
        Ok(Box::new(ReadyHandle))
    }
}

struct ReadyHandle;

#[async_trait]
impl AdaptiveHandle for ReadyHandle {
    async fn await_manifest(&self) -> Result<(), StreamFault> {
        Ok(())
    }
    fn detach(&self) {}
}

struct FlagGate {
    allowed: AtomicBool,
}

impl FlagGate {
    fn new(allowed: bool) -> Self {
        Self {
            allowed: AtomicBool::new(allowed),
        }
    }
}

#[async_trait]
impl AccessGate for FlagGate {
    async fn is_authenticated(&self) -> bool {
        self.allowed.load(Ordering::SeqCst)
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn film_songs_catalog() -> serde_json::Value {
    serde_json::json!({
        "content": [
            {
                "content_id": "film-songs#vol1#MovieA#song1",
                "category": "film-songs",
                "album_or_season": "vol1",
                "movie_or_show": "MovieA",
                "content_type": "EPISODE",
                "title": "Song One",
                "singer": "Artist A",
                "s3Key": "audio/film-songs/vol1/song1.mp3",
                "cloudfront_url": "https://cdn.example.com/film-songs/vol1/song1.mp3"
            },
            {
                "content_id": "film-songs#vol1#MovieA#song2",
                "category": "film-songs",
                "album_or_season": "vol1",
                "movie_or_show": "MovieA",
                "content_type": "EPISODE",
                "title": "Song Two",
                "singer": "Artist B",
                "s3Key": "audio/film-songs/vol1/song2.mp3",
                "cloudfront_url": "https://cdn.example.com/film-songs/vol1/song2.mp3"
            }
        ]
    })
}

fn service_with(http: Arc<dyn HttpClient>, gate: Arc<FlagGate>) -> CoreService {
    let deps = CoreDependencies::new(
        http,
        Arc::new(NoopTransport),
        Arc::new(ReadyEngine),
        gate,
    );
    let config = CoreConfig::new(CatalogConfig::new("https://api.example.com/prod"));
    CoreService::new(deps, config).unwrap()
}

fn episodes(view: &NavView) -> Vec<ContentRecord> {
    match view {
        NavView::Episodes(records) => records.clone(),
        other => panic!("Expected episodes view, got {:?}", other),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn gate_rejects_browsing_and_playback_until_authenticated() {
    let gate = Arc::new(FlagGate::new(false));
    let http = Arc::new(ScriptedHttp::default().route("/category/film-songs", film_songs_catalog()));
    let core = service_with(http, Arc::clone(&gate));

    assert!(matches!(
        core.browse_category(Category::FilmSongs).await,
        Err(CoreError::NotAuthenticated)
    ));
    assert!(matches!(
        core.categories().await,
        Err(CoreError::NotAuthenticated)
    ));

    gate.allowed.store(true, Ordering::SeqCst);
    assert!(core.browse_category(Category::FilmSongs).await.is_ok());
}

#[tokio::test]
async fn browse_to_leaf_then_play_starts_a_session() {
    let gate = Arc::new(FlagGate::new(true));
    let http = Arc::new(ScriptedHttp::default().route("/category/film-songs", film_songs_catalog()));
    let core = service_with(http, gate);

    core.browse_category(Category::FilmSongs).await.unwrap();
    core.browse_select("vol1").await.unwrap();
    assert_eq!(core.breadcrumb().await, "FILM SONGS > VOL1");

    let leaf = core.browse_select("MovieA").await.unwrap();
    let records = episodes(&leaf);
    assert_eq!(records.len(), 2);

    core.play_episode(&records[0]).await.unwrap();
    let player = core.player();
    assert_eq!(player.status(), SessionStatus::Playing);
    assert_eq!(
        player.session().unwrap().source.url,
        "https://cdn.example.com/film-songs/vol1/song1.mp3"
    );
}

#[tokio::test]
async fn categories_fall_back_to_builtin_set_when_listing_fails() {
    let gate = Arc::new(FlagGate::new(true));
    let core = service_with(Arc::new(FailingHttp), gate);

    let categories = core.categories().await.unwrap();
    assert_eq!(categories, Category::ALL.to_vec());
}

#[tokio::test]
async fn failed_resolution_leaves_the_current_session_untouched() {
    let gate = Arc::new(FlagGate::new(true));
    let http = Arc::new(ScriptedHttp::default().route("/category/film-songs", film_songs_catalog()));
    let core = service_with(http, gate);

    core.browse_category(Category::FilmSongs).await.unwrap();
    core.browse_select("vol1").await.unwrap();
    let records = episodes(&core.browse_select("MovieA").await.unwrap());

    core.play_episode(&records[0]).await.unwrap();

    // A record with no URL, no CDN base and a failing playback endpoint
    // cannot resolve; the playing session must survive.
    let mut unresolvable = records[1].clone();
    unresolvable.media_url = None;
    unresolvable.media_key = "audio/other.mp3".into();
    let result = core.play_episode(&unresolvable).await;

    assert!(matches!(result, Err(CoreError::Catalog(_))));
    let session = core.player().session().unwrap();
    assert_eq!(session.status, SessionStatus::Playing);
    assert_eq!(
        session.record.content_id.as_str(),
        "film-songs#vol1#MovieA#song1"
    );
}

#[tokio::test]
async fn selecting_before_a_category_is_a_navigation_error() {
    let gate = Arc::new(FlagGate::new(true));
    let http = Arc::new(ScriptedHttp::default());
    let core = service_with(http, gate);

    assert!(matches!(
        core.browse_select("vol1").await,
        Err(CoreError::Navigation(_))
    ));
}

#[tokio::test]
async fn home_and_jump_navigate_the_breadcrumb() {
    let gate = Arc::new(FlagGate::new(true));
    let http = Arc::new(ScriptedHttp::default().route("/category/film-songs", film_songs_catalog()));
    let core = service_with(http, gate);

    core.browse_category(Category::FilmSongs).await.unwrap();
    core.browse_select("vol1").await.unwrap();
    core.browse_select("MovieA").await.unwrap();

    let back_at_albums = core.browse_jump(1).await.unwrap();
    assert!(matches!(back_at_albums, NavView::Listing { .. }));
    assert_eq!(core.breadcrumb().await, "FILM SONGS");

    assert_eq!(core.browse_home().await.unwrap(), NavView::Root);
    assert_eq!(core.breadcrumb().await, "");
}
