//! Desktop bridge implementations.
//!
//! Native (non-wasm) adapters for the `bridge-traits` seams. Currently this
//! is just the reqwest-backed HTTP client the catalog layer runs on.

pub mod http;

pub use http::ReqwestHttpClient;
