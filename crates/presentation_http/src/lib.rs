//! HTTP presentation layer
//!
//! Routers for the consumer service (calls the provider through the
//! resilience layer) and the demo provider service, plus the response
//! envelope that outcomes are translated into.

pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use response::{ApiResponse, translate, translate_with_data};
pub use routes::{create_consumer_router, create_provider_router};
pub use state::{ConsumerState, ProviderState};
