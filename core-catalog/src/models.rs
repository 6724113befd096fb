//! Domain models for the content catalog
//!
//! One flat record type covers every row the catalog API returns; the
//! hierarchy (category → genre/album → show/movie → season → episode) is
//! derived by filtering, never stored. Composite keys are decomposed once
//! at ingestion, not re-split at every filter site.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// ID Types
// =============================================================================

/// Unique identifier for a catalog record.
///
/// The API encodes the full hierarchy position into the id as a
/// `#`-delimited composite key, e.g.
/// `stories#horror#BhootadaMane1#season1#episode1`. The id is treated as
/// opaque for identity purposes; [`ContentPath`] decodes the structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId(pub String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Category
// =============================================================================

/// Top-level content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    FilmSongs,
    Stories,
    Podcasts,
    WebSeries,
}

impl Category {
    /// All known categories, in the order the category grid presents them.
    pub const ALL: [Category; 4] = [
        Category::FilmSongs,
        Category::Stories,
        Category::Podcasts,
        Category::WebSeries,
    ];

    /// The API token for this category (`film-songs`, `stories`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FilmSongs => "film-songs",
            Category::Stories => "stories",
            Category::Podcasts => "podcasts",
            Category::WebSeries => "web-series",
        }
    }

    /// Parse an API category token.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "film-songs" => Some(Category::FilmSongs),
            "stories" => Some(Category::Stories),
            "podcasts" => Some(Category::Podcasts),
            "web-series" => Some(Category::WebSeries),
            _ => None,
        }
    }

    /// Navigation depth of this category's hierarchy, counting the episode
    /// leaf. Shallower categories (film-songs, podcasts) must not produce
    /// spurious intermediate levels.
    pub fn hierarchy_depth(&self) -> usize {
        match self {
            Category::FilmSongs | Category::Podcasts => 3,
            Category::Stories | Category::WebSeries => 4,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Content Records
// =============================================================================

/// Whether a record is an organizing unit or a directly playable leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentKind {
    Container,
    Episode,
}

/// Structured decomposition of a composite content id.
///
/// The catalog encodes hierarchy position as
/// `category#genre#show#season#episode`; shorter ids simply omit trailing
/// segments. Decomposition happens once, at ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPath {
    pub category: String,
    pub genre: Option<String>,
    pub show: Option<String>,
    pub season: Option<String>,
    pub episode: Option<String>,
}

impl ContentPath {
    /// Decompose a `#`-delimited composite key. Returns `None` for an
    /// empty id.
    pub fn parse(content_id: &str) -> Option<Self> {
        let mut parts = content_id.split('#').map(str::to_string);
        let category = parts.next().filter(|c| !c.is_empty())?;
        Some(Self {
            category,
            genre: parts.next(),
            show: parts.next(),
            season: parts.next(),
            episode: parts.next(),
        })
    }
}

/// One row of the flat catalog.
///
/// Field names follow the catalog API's wire format; aliases cover the
/// older key names still present in parts of the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub content_id: ContentId,
    pub category: Category,

    /// Album or season name, depending on category.
    #[serde(rename = "album_or_season")]
    pub group_key: String,

    /// Movie or show name, depending on category.
    #[serde(rename = "movie_or_show")]
    pub container_key: String,

    #[serde(rename = "content_type")]
    pub kind: ContentKind,

    pub title: String,

    /// Singer (film songs) or author (stories), when the backend knows it.
    #[serde(rename = "singer", default)]
    pub secondary_label: Option<String>,

    /// Opaque storage locator for the media object.
    #[serde(alias = "s3Key", default)]
    pub media_key: String,

    /// Precomputed delivery URL, when the backend provides one.
    #[serde(alias = "cloudfront_url", default)]
    pub media_url: Option<String>,

    /// Genre token decoded from the composite id at ingestion. Only
    /// meaningful for stories and web-series.
    #[serde(skip)]
    pub genre: Option<String>,
}

impl ContentRecord {
    /// Returns `true` for a directly playable leaf record.
    pub fn is_episode(&self) -> bool {
        self.kind == ContentKind::Episode
    }

    /// Decode the composite id and fill the structured fields. Called once
    /// per record when a fetch response is ingested.
    pub fn with_decomposed_path(mut self) -> Self {
        if matches!(self.category, Category::Stories | Category::WebSeries) {
            self.genre = ContentPath::parse(self.content_id.as_str())
                .and_then(|path| path.genre)
                .filter(|g| !g.is_empty());
        }
        self
    }

    /// Check the record invariants: every episode must carry a non-empty
    /// media key. Invalid records are dropped at ingestion with a warning.
    pub fn is_well_formed(&self) -> bool {
        !self.is_episode() || !self.media_key.is_empty()
    }
}
