//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod image_registry_port;
mod remote_service_port;

#[cfg(test)]
pub use image_registry_port::MockImageRegistryPort;
pub use image_registry_port::{CommandOutput, ImageRegistryPort, RegistryCredentials};
#[cfg(test)]
pub use remote_service_port::MockRemoteServicePort;
pub use remote_service_port::RemoteServicePort;
