//! Breadcrumb path value types
//!
//! The path is an ordered record of navigation choices. It is used both for
//! display and for deterministic view reconstruction: each segment is a
//! filter, and re-applying all segments to the catalog store rebuilds the
//! visible item set at any depth.

use core_catalog::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hierarchy level a path segment filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavLevel {
    /// Top-level content type (film-songs, stories, ...).
    Category,
    /// Genre token decoded from composite ids (stories, web-series).
    Genre,
    /// Movie or show name.
    Container,
    /// Album or season name.
    Group,
}

/// One navigation choice: a level and the selected value at that level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    pub level: NavLevel,
    pub value: String,
}

impl PathSegment {
    pub fn new(level: NavLevel, value: impl Into<String>) -> Self {
        Self {
            level,
            value: value.into(),
        }
    }

    /// Display form of the segment value: uppercased with dashes mapped to
    /// spaces, matching how the breadcrumb bar renders (`FILM SONGS`).
    pub fn display_label(&self) -> String {
        self.value.replace('-', " ").to_uppercase()
    }
}

/// Ordered sequence of navigation choices, starting empty at the root.
///
/// Only the navigation state machine mutates a path, and back-navigation
/// truncates it, never edits segments in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbPath {
    segments: Vec<PathSegment>,
}

impl BreadcrumbPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Navigation depth: number of choices made so far.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// The category this path descends into, decoded from the first
    /// segment. `None` at the root.
    pub fn category(&self) -> Option<Category> {
        self.segments
            .first()
            .and_then(|segment| Category::parse(&segment.value))
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Remove the last segment. Returns it, or `None` at the root.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Truncate to the first `depth` segments.
    pub fn truncate(&mut self, depth: usize) {
        self.segments.truncate(depth);
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }
}

impl fmt::Display for BreadcrumbPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, " > ")?;
            }
            write!(f, "{}", segment.display_label())?;
        }
        Ok(())
    }
}
