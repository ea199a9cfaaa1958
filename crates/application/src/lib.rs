//! Application layer - Use cases and orchestration
//!
//! Contains the remote-call resilience pipeline (classification, retry,
//! fallback, interception) and the port definitions adapters implement.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
