//! Daily challenge generation.
//!
//! The service call is the only suspension point in the crate. Everything
//! around it (guards, classification, normalization) is synchronous and
//! driven by [`crate::planner::Planner`].

pub mod gemini;
pub mod normalize;
pub mod pipeline;
pub mod service;

pub use gemini::GeminiClient;
pub use normalize::normalize_challenge;
pub use pipeline::{classify, GenerationPhase, GenerationRequest};
pub use service::{GenerationService, ServiceFailure};
