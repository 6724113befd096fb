//! # Catalog Module
//!
//! Normalized, queryable view of the flat content catalog served by the
//! catalog REST API, plus resolution of a catalog record into a playable
//! media source.
//!
//! ## Overview
//!
//! This crate handles:
//! - Catalog API access (category listing, per-category content, episode
//!   listings, playback-URL requests) over the `bridge-traits` HTTP seam
//! - Domain models with composite-key decomposition applied once at ingestion
//! - The per-category in-memory store with soft-failure fetch semantics
//! - Source resolution (precomputed URL, CDN key join, on-demand request)

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
pub mod store;

pub use client::CatalogClient;
pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use models::{Category, ContentId, ContentKind, ContentPath, ContentRecord};
pub use resolver::{ResolvedSource, SourceResolver, TransportKind};
pub use store::CatalogStore;
