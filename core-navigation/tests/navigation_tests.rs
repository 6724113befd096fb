//! Integration tests for the navigation state machine.
//!
//! The store is seeded directly through `CatalogStore::replace`, with a
//! stub HTTP client that fails any request, so every scenario runs offline
//! and exercises pure path-to-view reconstruction.

use async_trait::async_trait;
use bridge_traits::error::BridgeError;
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use core_catalog::{
    CatalogClient, CatalogConfig, CatalogStore, Category, ContentId, ContentKind, ContentRecord,
};
use core_navigation::{
    BackFromLeaf, NavLevel, NavState, NavView, NavigationConfig, Navigator,
};
use std::sync::Arc;

struct OfflineHttp;

#[async_trait]
impl HttpClient for OfflineHttp {
    async fn execute(
        &self,
        _request: HttpRequest,
    ) -> std::result::Result<HttpResponse, BridgeError> {
        Err(BridgeError::NotAvailable("offline test client".into()))
    }
}

fn seeded_store() -> Arc<CatalogStore> {
    let config = CatalogConfig::new("https://api.example.com");
    let client = CatalogClient::new(Arc::new(OfflineHttp), config).unwrap();
    let store = Arc::new(CatalogStore::new(client));

    store.replace(
        Category::FilmSongs,
        vec![
            episode("film-songs#vol1#MovieA#song1", Category::FilmSongs, "vol1", "MovieA"),
            episode("film-songs#vol1#MovieA#song2", Category::FilmSongs, "vol1", "MovieA"),
            episode("film-songs#vol1#MovieB#song1", Category::FilmSongs, "vol1", "MovieB"),
            episode("film-songs#vol2#MovieC#song1", Category::FilmSongs, "vol2", "MovieC"),
        ],
    );
    store.replace(
        Category::Podcasts,
        vec![
            episode("podcasts#season1#episode1", Category::Podcasts, "season1", "Podcast"),
            episode("podcasts#season1#episode2", Category::Podcasts, "season1", "Podcast"),
            episode("podcasts#season2#episode1", Category::Podcasts, "season2", "Podcast"),
        ],
    );
    store.replace(
        Category::Stories,
        vec![
            episode(
                "stories#horror#BhootadaMane1#season1#episode1",
                Category::Stories,
                "season1",
                "BhootadaMane1",
            ),
            episode(
                "stories#horror#BhootadaMane1#season1#episode2",
                Category::Stories,
                "season1",
                "BhootadaMane1",
            ),
            episode(
                "stories#thriller#Nigooda#season1#episode1",
                Category::Stories,
                "season1",
                "Nigooda",
            ),
        ],
    );
    store
}

fn episode(id: &str, category: Category, group: &str, container: &str) -> ContentRecord {
    ContentRecord {
        content_id: ContentId::new(id),
        category,
        group_key: group.into(),
        container_key: container.into(),
        kind: ContentKind::Episode,
        title: id.rsplit('#').next().unwrap().to_string(),
        secondary_label: None,
        media_key: format!("audio/{}.mp3", id.replace('#', "/")),
        media_url: None,
        genre: None,
    }
    .with_decomposed_path()
}

fn listing_items(view: &NavView) -> Vec<String> {
    match view {
        NavView::Listing { items, .. } => items.clone(),
        other => panic!("Expected listing view, got {:?}", other),
    }
}

fn episode_ids(view: &NavView) -> Vec<String> {
    match view {
        NavView::Episodes(records) => records
            .iter()
            .map(|r| r.content_id.as_str().to_string())
            .collect(),
        other => panic!("Expected episodes view, got {:?}", other),
    }
}

#[tokio::test]
async fn select_category_then_back_returns_to_root() {
    let mut nav = Navigator::new(seeded_store(), NavigationConfig::default());
    assert_eq!(nav.state(), NavState::AtRoot);

    let view = nav.select_category(Category::FilmSongs).await;
    assert_eq!(listing_items(&view), vec!["vol1", "vol2"]);
    assert!(matches!(nav.state(), NavState::AtLevel(_)));

    let view = nav.go_back();
    assert_eq!(view, NavView::Root);
    assert_eq!(nav.state(), NavState::AtRoot);
}

#[tokio::test]
async fn back_reconstructs_the_same_views_as_forward() {
    let mut nav = Navigator::new(seeded_store(), NavigationConfig::default());

    let v1 = nav.select_category(Category::FilmSongs).await;
    let v2 = nav.select_item("vol1").unwrap();
    let v3 = nav.select_item("MovieA").unwrap();
    assert!(v3.is_leaf());

    // Ascend and compare against the views seen on the way down.
    assert_eq!(nav.go_back(), v2);
    assert_eq!(nav.go_back(), v1);
    assert_eq!(nav.go_back(), NavView::Root);
}

#[tokio::test]
async fn each_descent_narrows_the_record_set() {
    let store = seeded_store();
    let mut nav = Navigator::new(Arc::clone(&store), NavigationConfig::default());

    nav.select_category(Category::FilmSongs).await;
    let at_albums = listing_items(&nav.current_view());
    assert_eq!(at_albums, vec!["vol1", "vol2"]);

    let movies = listing_items(&nav.select_item("vol1").unwrap());
    assert_eq!(movies, vec!["MovieA", "MovieB"]);

    let leaf = nav.select_item("MovieA").unwrap();
    assert_eq!(
        episode_ids(&leaf),
        vec!["film-songs#vol1#MovieA#song1", "film-songs#vol1#MovieA#song2"]
    );
}

#[tokio::test]
async fn sibling_selection_after_back_shows_disjoint_episodes() {
    let mut nav = Navigator::new(seeded_store(), NavigationConfig::default());

    nav.select_category(Category::FilmSongs).await;
    nav.select_item("vol1").unwrap();
    let movie_a = episode_ids(&nav.select_item("MovieA").unwrap());

    nav.go_back();
    let movie_b = episode_ids(&nav.select_item("MovieB").unwrap());

    assert_eq!(movie_b, vec!["film-songs#vol1#MovieB#song1"]);
    assert!(movie_a.iter().all(|id| !movie_b.contains(id)));
}

#[tokio::test]
async fn stories_descend_through_genre_show_and_season() {
    let mut nav = Navigator::new(seeded_store(), NavigationConfig::default());

    let genres = nav.select_category(Category::Stories).await;
    assert_eq!(listing_items(&genres), vec!["horror", "thriller"]);

    let shows = nav.select_item("horror").unwrap();
    assert!(matches!(
        shows,
        NavView::Listing { level: NavLevel::Container, .. }
    ));
    assert_eq!(listing_items(&shows), vec!["BhootadaMane1"]);

    let seasons = nav.select_item("BhootadaMane1").unwrap();
    assert_eq!(listing_items(&seasons), vec!["season1"]);

    let leaf = nav.select_item("season1").unwrap();
    assert_eq!(episode_ids(&leaf).len(), 2);
}

#[tokio::test]
async fn podcasts_reach_episodes_after_one_selection() {
    let mut nav = Navigator::new(seeded_store(), NavigationConfig::default());

    let seasons = nav.select_category(Category::Podcasts).await;
    assert_eq!(listing_items(&seasons), vec!["season1", "season2"]);

    let leaf = nav.select_item("season1").unwrap();
    assert!(leaf.is_leaf());
    assert_eq!(episode_ids(&leaf).len(), 2);
}

#[tokio::test]
async fn back_from_leaf_category_root_policy_jumps_to_first_level() {
    let config = NavigationConfig {
        back_from_leaf: BackFromLeaf::CategoryRoot,
    };
    let mut nav = Navigator::new(seeded_store(), config);

    nav.select_category(Category::FilmSongs).await;
    nav.select_item("vol1").unwrap();
    let leaf = nav.select_item("MovieA").unwrap();
    assert!(leaf.is_leaf());

    // One back from the leaf skips the movie level entirely.
    let view = nav.go_back();
    assert_eq!(listing_items(&view), vec!["vol1", "vol2"]);
    assert_eq!(nav.path().depth(), 1);
}

#[tokio::test]
async fn back_from_intermediate_level_pops_one_even_under_category_root_policy() {
    let config = NavigationConfig {
        back_from_leaf: BackFromLeaf::CategoryRoot,
    };
    let mut nav = Navigator::new(seeded_store(), config);

    nav.select_category(Category::Stories).await;
    nav.select_item("horror").unwrap();

    let view = nav.go_back();
    assert_eq!(listing_items(&view), vec!["horror", "thriller"]);
}

#[tokio::test]
async fn jump_to_breadcrumb_prefix_restores_that_level() {
    let mut nav = Navigator::new(seeded_store(), NavigationConfig::default());

    nav.select_category(Category::Stories).await;
    nav.select_item("horror").unwrap();
    nav.select_item("BhootadaMane1").unwrap();
    nav.select_item("season1").unwrap();

    let view = nav.jump_to(2);
    assert_eq!(listing_items(&view), vec!["BhootadaMane1"]);
    assert_eq!(nav.path().depth(), 2);

    assert_eq!(nav.jump_to(0), NavView::Root);
}

#[tokio::test]
async fn go_home_resets_from_any_depth() {
    let mut nav = Navigator::new(seeded_store(), NavigationConfig::default());

    nav.select_category(Category::FilmSongs).await;
    nav.select_item("vol1").unwrap();
    nav.select_item("MovieA").unwrap();

    assert_eq!(nav.go_home(), NavView::Root);
    assert_eq!(nav.state(), NavState::AtRoot);
}

#[tokio::test]
async fn select_item_at_root_is_rejected() {
    let mut nav = Navigator::new(seeded_store(), NavigationConfig::default());
    assert!(nav.select_item("vol1").is_err());
}

#[tokio::test]
async fn unloaded_category_degrades_to_empty_listing() {
    // The offline client fails every fetch, so an unseeded category loads
    // as empty rather than erroring.
    let config = CatalogConfig::new("https://api.example.com");
    let client = CatalogClient::new(Arc::new(OfflineHttp), config).unwrap();
    let store = Arc::new(CatalogStore::new(client));
    let mut nav = Navigator::new(store, NavigationConfig::default());

    let view = nav.select_category(Category::WebSeries).await;
    assert_eq!(listing_items(&view), Vec::<String>::new());

    // Back still works from the empty level.
    assert_eq!(nav.go_back(), NavView::Root);
}

#[tokio::test]
async fn breadcrumb_display_tracks_the_path() {
    let mut nav = Navigator::new(seeded_store(), NavigationConfig::default());

    nav.select_category(Category::FilmSongs).await;
    nav.select_item("vol1").unwrap();
    assert_eq!(nav.path().to_string(), "FILM SONGS > VOL1");

    nav.go_back();
    assert_eq!(nav.path().to_string(), "FILM SONGS");
}
