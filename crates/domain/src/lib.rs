//! Domain layer for MeshCall
//!
//! Contains the vocabulary of the remote-call resilience layer: remote operations,
//! the failure taxonomy, fallback responses, and registry image references.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
