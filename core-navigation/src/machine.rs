//! Navigation state machine
//!
//! Cyclic machine over two states: `AtRoot` (the category grid) and
//! `AtLevel(path)`. Forward descent pushes path segments, back-ascent
//! truncates them, and every visible item set is derived purely from
//! path + store. There is no separately cached "previous" item list.

use core_catalog::{Category, CatalogStore, ContentRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::{NavigationError, Result};
use crate::path::{BreadcrumbPath, NavLevel, PathSegment};

/// Where `go_back` lands when leaving an episode leaf view.
///
/// The product drafts disagreed on this (season level vs. straight back to
/// the category's first level for podcasts), so it is a named policy
/// rather than an accident of one draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackFromLeaf {
    /// Pop one level: leaf → containing season/show/album view.
    #[default]
    ContainingLevel,
    /// Jump to the category's first-level grouping view.
    CategoryRoot,
}

/// Navigation behavior configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default)]
    pub back_from_leaf: BackFromLeaf,
}

/// Current machine state. The machine is cyclic by design: there is no
/// absorbing state, and any leaf selection returns to browsing via
/// back-navigation or home-reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    AtRoot,
    AtLevel(BreadcrumbPath),
}

/// The visible item set at the current navigation position.
#[derive(Debug, Clone, PartialEq)]
pub enum NavView {
    /// Category grid (root).
    Root,
    /// A browsing level: distinct values to choose from at `level`.
    Listing { level: NavLevel, items: Vec<String> },
    /// Leaf reached: directly playable episode records.
    Episodes(Vec<ContentRecord>),
}

impl NavView {
    pub fn is_leaf(&self) -> bool {
        matches!(self, NavView::Episodes(_))
    }
}

/// Sequence of levels a category descends through before the episode leaf.
fn level_ladder(category: Category) -> &'static [NavLevel] {
    match category {
        // Albums, then movies within the album.
        Category::FilmSongs => &[NavLevel::Category, NavLevel::Group, NavLevel::Container],
        // Seasons only; episodes follow directly.
        Category::Podcasts => &[NavLevel::Category, NavLevel::Group],
        // Genre, show, then season.
        Category::Stories => &[
            NavLevel::Category,
            NavLevel::Genre,
            NavLevel::Container,
            NavLevel::Group,
        ],
        // Show, then season.
        Category::WebSeries => &[NavLevel::Category, NavLevel::Container, NavLevel::Group],
    }
}

fn segment_matches(record: &ContentRecord, segment: &PathSegment) -> bool {
    match segment.level {
        NavLevel::Category => record.category.as_str() == segment.value,
        NavLevel::Genre => record.genre.as_deref() == Some(segment.value.as_str()),
        NavLevel::Container => record.container_key == segment.value,
        NavLevel::Group => record.group_key == segment.value,
    }
}

/// The discriminator a record exposes at a given level.
fn level_value(record: &ContentRecord, level: NavLevel) -> Option<&str> {
    match level {
        NavLevel::Category => Some(record.category.as_str()),
        NavLevel::Genre => record.genre.as_deref(),
        NavLevel::Container => Some(&record.container_key),
        NavLevel::Group => Some(&record.group_key),
    }
}

/// Distinct values at `level`, in first-seen order of the record sequence.
///
/// Ordering contract: insertion-order-preserving. The derived list is
/// reproducible for identical input; if the backend ever returns the flat
/// list in a different order, the groups reorder with it.
fn distinct_values(records: &[ContentRecord], level: NavLevel) -> Vec<String> {
    let mut seen = Vec::new();
    for record in records {
        if let Some(value) = level_value(record, level) {
            if !seen.iter().any(|s| s == value) {
                seen.push(value.to_string());
            }
        }
    }
    seen
}

/// Hierarchical navigation over the catalog store.
pub struct Navigator {
    store: Arc<CatalogStore>,
    path: BreadcrumbPath,
    config: NavigationConfig,
}

impl Navigator {
    pub fn new(store: Arc<CatalogStore>, config: NavigationConfig) -> Self {
        Self {
            store,
            path: BreadcrumbPath::new(),
            config,
        }
    }

    pub fn state(&self) -> NavState {
        if self.path.is_empty() {
            NavState::AtRoot
        } else {
            NavState::AtLevel(self.path.clone())
        }
    }

    pub fn path(&self) -> &BreadcrumbPath {
        &self.path
    }

    /// Recompute the view for the current path without mutating anything.
    pub fn current_view(&self) -> NavView {
        self.view_for_path(&self.path)
    }

    /// Enter a category from the root: loads its content (if not cached)
    /// and derives the first-level grouping.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn select_category(&mut self, category: Category) -> NavView {
        self.store.ensure_loaded(category).await;
        self.path.clear();
        self.path
            .push(PathSegment::new(NavLevel::Category, category.as_str()));
        let view = self.current_view();
        debug!(path = %self.path, "Selected category");
        view
    }

    /// Descend one level by the selected item's discriminator. Returns the
    /// episode leaf view once the category's level ladder is exhausted (or
    /// earlier, when the narrowed set can no longer be subdivided).
    pub fn select_item(&mut self, value: &str) -> Result<NavView> {
        let category = self
            .path
            .category()
            .ok_or(NavigationError::NoCategorySelected)?;

        let ladder = level_ladder(category);
        if self.path.depth() >= ladder.len() {
            // Already at the episode leaf; nothing further to descend into.
            return Ok(self.current_view());
        }

        let level = ladder[self.path.depth()];
        self.path.push(PathSegment::new(level, value));
        let view = self.current_view();
        debug!(path = %self.path, leaf = view.is_leaf(), "Selected item");
        Ok(view)
    }

    /// Ascend one level (or per the [`BackFromLeaf`] policy when leaving a
    /// leaf view). The restored view is recomputed from the remaining path.
    pub fn go_back(&mut self) -> NavView {
        if self.path.is_empty() {
            return NavView::Root;
        }

        let leaving_leaf = self.current_view().is_leaf();
        if leaving_leaf
            && self.config.back_from_leaf == BackFromLeaf::CategoryRoot
            && self.path.depth() > 1
        {
            self.path.truncate(1);
        } else {
            self.path.pop();
        }

        let view = if self.path.is_empty() {
            NavView::Root
        } else {
            self.current_view()
        };
        debug!(path = %self.path, "Went back");
        view
    }

    /// Reset to the category grid unconditionally.
    pub fn go_home(&mut self) -> NavView {
        self.path.clear();
        NavView::Root
    }

    /// Jump to a breadcrumb prefix: keep the first `depth` segments and
    /// recompute. Equivalent to repeated `go_back` with the default policy.
    pub fn jump_to(&mut self, depth: usize) -> NavView {
        self.path.truncate(depth);
        if self.path.is_empty() {
            NavView::Root
        } else {
            self.current_view()
        }
    }

    fn view_for_path(&self, path: &BreadcrumbPath) -> NavView {
        let Some(category) = path.category() else {
            return NavView::Root;
        };

        let records = self.store.records(category);
        let filtered: Vec<ContentRecord> = records
            .iter()
            .filter(|record| path.segments().iter().all(|s| segment_matches(record, s)))
            .cloned()
            .collect();

        let ladder = level_ladder(category);
        if path.depth() >= ladder.len() {
            return NavView::Episodes(filtered.into_iter().filter(|r| r.is_episode()).collect());
        }

        let level = ladder[path.depth()];
        let items = distinct_values(&filtered, level);

        // A narrowed set that is entirely episodes with nothing left to
        // discriminate on (e.g., records missing a genre token) is a leaf
        // even before the ladder runs out.
        let all_episodes = !filtered.is_empty() && filtered.iter().all(ContentRecord::is_episode);
        if items.is_empty() && all_episodes {
            return NavView::Episodes(filtered);
        }

        NavView::Listing { level, items }
    }
}
