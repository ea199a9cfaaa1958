//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod http_remote_adapter;
mod skopeo_adapter;

pub use http_remote_adapter::HttpRemoteAdapter;
pub use skopeo_adapter::SkopeoAdapter;
