//! Text generator trait definition

use crate::{GenerationRequest, Result};
use async_trait::async_trait;

/// Trait for text-generation providers
///
/// Implementations of this trait provide best-effort text completion from
/// an LLM service. Callers expect deterministic-ish behavior at low
/// temperature and handle failures themselves; providers report errors but
/// never retry.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a single prompt
    ///
    /// # Arguments
    ///
    /// * `request` - The generation request with prompt and sampling parameters
    ///
    /// # Returns
    ///
    /// The generated text, trimmed of surrounding whitespace
    async fn generate(&self, request: GenerationRequest) -> Result<String>;

    /// Get the provider name (e.g., "gemini")
    fn name(&self) -> &str;
}
