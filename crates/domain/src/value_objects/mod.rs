//! Value Objects - Immutable, identity-less domain primitives

mod failure_kind;
mod image_reference;

pub use failure_kind::FailureKind;
pub use image_reference::{DOCKER_TRANSPORT, ImageReference};
