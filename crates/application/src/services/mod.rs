//! Application services
//!
//! The resilience pipeline for outbound calls and the use cases built on it.

mod call_interceptor;
mod error_classifier;
mod fallback_responder;
mod image_service;
mod provider_client;
mod retry_policy;

pub use call_interceptor::{CallInterceptor, CallOutcome, CallState};
pub use error_classifier::ErrorClassifier;
pub use fallback_responder::{FallbackResponder, OperationCategory};
pub use image_service::{DEFAULT_IMAGE, DEFAULT_PROJECT, DEFAULT_TAG, ImageService, PushTarget};
pub use provider_client::{ProviderClient, operations};
pub use retry_policy::{RetryConfig, RetryDecision, RetryPolicy, RetryState};
