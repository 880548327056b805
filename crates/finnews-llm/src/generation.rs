//! Generation request types

use serde::{Deserialize, Serialize};

/// Default sampling temperature when the builder leaves it unset
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Default output token budget when the builder leaves it unset
pub const DEFAULT_MAX_OUTPUT_TOKENS: usize = 500;

/// A single-prompt text-generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model identifier (provider-specific)
    pub model: String,

    /// The full prompt text
    pub prompt: String,

    /// Sampling temperature (0.0-1.0)
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_output_tokens: usize,
}

impl GenerationRequest {
    /// Create a builder for generation requests
    pub fn builder(model: impl Into<String>) -> GenerationRequestBuilder {
        GenerationRequestBuilder::new(model)
    }
}

/// Builder for GenerationRequest
pub struct GenerationRequestBuilder {
    model: String,
    prompt: String,
    temperature: f32,
    max_output_tokens: usize,
}

impl GenerationRequestBuilder {
    /// Create a new builder
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    /// Set the prompt text
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the output token budget
    pub fn max_output_tokens(mut self, max_output_tokens: usize) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Build the generation request
    pub fn build(self) -> GenerationRequest {
        GenerationRequest {
            model: self.model,
            prompt: self.prompt,
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }
}
