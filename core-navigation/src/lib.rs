//! # Navigation Module
//!
//! Hierarchical navigation state machine over the flat catalog. The
//! breadcrumb path is the single source of truth: every visible item set is
//! recomputed by re-applying the path's filters to the catalog store, which
//! makes back-navigation correct after arbitrary forward navigation.

pub mod error;
pub mod machine;
pub mod path;

pub use error::{NavigationError, Result};
pub use machine::{BackFromLeaf, NavState, NavView, NavigationConfig, Navigator};
pub use path::{BreadcrumbPath, NavLevel, PathSegment};
