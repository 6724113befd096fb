//! Host abstraction traits for the audiocast core.
//!
//! Core crates never talk to a concrete HTTP library; they consume the
//! [`http::HttpClient`] trait and the host supplies an implementation
//! (see `bridge-desktop` for the reqwest-backed one).

pub mod error;
pub mod http;

pub use error::{BridgeError, Result};
