//! LLM text-generation abstraction for finnews-rs
//!
//! This crate provides a provider-agnostic interface for single-prompt text
//! generation. It includes:
//!
//! - Generation request types with builder
//! - The `TextGenerator` trait implemented by providers
//! - A Google Gemini provider (behind the `gemini` feature flag)

pub mod error;
pub mod generation;
pub mod provider;

// Re-export main types
pub use error::{LlmError, Result};
pub use generation::{GenerationRequest, GenerationRequestBuilder};
pub use provider::TextGenerator;

// Provider implementations (feature-gated)
#[cfg(feature = "gemini")]
pub mod providers;
