//! Configuration for pipeline runs

use finnews_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default Gemini model used when nothing else is configured
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Configuration for the analysis pipeline
///
/// The classification stages use a low temperature and tiny output budget
/// because they expect a single token back; the risk stage gets more room
/// for its comma-separated list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Model identifier passed to the text generator
    pub model: String,

    /// Sampling temperature for the sentiment stage
    pub sentiment_temperature: f32,

    /// Output token budget for the sentiment stage
    pub sentiment_max_tokens: usize,

    /// Sampling temperature for the market-impact stage
    pub impact_temperature: f32,

    /// Output token budget for the market-impact stage
    pub impact_max_tokens: usize,

    /// Sampling temperature for the entity-risk stage
    pub risk_temperature: f32,

    /// Output token budget for the entity-risk stage
    pub risk_max_tokens: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            sentiment_temperature: 0.2,
            sentiment_max_tokens: 10,
            impact_temperature: 0.2,
            impact_max_tokens: 10,
            risk_temperature: 0.3,
            risk_max_tokens: 100,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Override the model from the `GEMINI_MODEL` environment variable
    pub fn with_env_model(mut self) -> Self {
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            self.model = model;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(Error::Generic("model must not be empty".to_string()));
        }

        for (name, temperature) in [
            ("sentiment_temperature", self.sentiment_temperature),
            ("impact_temperature", self.impact_temperature),
            ("risk_temperature", self.risk_temperature),
        ] {
            if !(0.0..=1.0).contains(&temperature) {
                return Err(Error::Generic(format!(
                    "{name} must be within [0, 1], got {temperature}"
                )));
            }
        }

        for (name, budget) in [
            ("sentiment_max_tokens", self.sentiment_max_tokens),
            ("impact_max_tokens", self.impact_max_tokens),
            ("risk_max_tokens", self.risk_max_tokens),
        ] {
            if budget == 0 {
                return Err(Error::Generic(format!("{name} must be greater than 0")));
            }
        }

        Ok(())
    }
}

/// Builder for PipelineConfig
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    model: Option<String>,
    sentiment_temperature: Option<f32>,
    sentiment_max_tokens: Option<usize>,
    impact_temperature: Option<f32>,
    impact_max_tokens: Option<usize>,
    risk_temperature: Option<f32>,
    risk_max_tokens: Option<usize>,
}

impl PipelineConfigBuilder {
    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sentiment stage temperature
    pub fn sentiment_temperature(mut self, temperature: f32) -> Self {
        self.sentiment_temperature = Some(temperature);
        self
    }

    /// Set the sentiment stage token budget
    pub fn sentiment_max_tokens(mut self, max_tokens: usize) -> Self {
        self.sentiment_max_tokens = Some(max_tokens);
        self
    }

    /// Set the market-impact stage temperature
    pub fn impact_temperature(mut self, temperature: f32) -> Self {
        self.impact_temperature = Some(temperature);
        self
    }

    /// Set the market-impact stage token budget
    pub fn impact_max_tokens(mut self, max_tokens: usize) -> Self {
        self.impact_max_tokens = Some(max_tokens);
        self
    }

    /// Set the entity-risk stage temperature
    pub fn risk_temperature(mut self, temperature: f32) -> Self {
        self.risk_temperature = Some(temperature);
        self
    }

    /// Set the entity-risk stage token budget
    pub fn risk_max_tokens(mut self, max_tokens: usize) -> Self {
        self.risk_max_tokens = Some(max_tokens);
        self
    }

    /// Build the configuration, validating it
    pub fn build(self) -> Result<PipelineConfig> {
        let defaults = PipelineConfig::default();
        let config = PipelineConfig {
            model: self.model.unwrap_or(defaults.model),
            sentiment_temperature: self
                .sentiment_temperature
                .unwrap_or(defaults.sentiment_temperature),
            sentiment_max_tokens: self
                .sentiment_max_tokens
                .unwrap_or(defaults.sentiment_max_tokens),
            impact_temperature: self.impact_temperature.unwrap_or(defaults.impact_temperature),
            impact_max_tokens: self.impact_max_tokens.unwrap_or(defaults.impact_max_tokens),
            risk_temperature: self.risk_temperature.unwrap_or(defaults.risk_temperature),
            risk_max_tokens: self.risk_max_tokens.unwrap_or(defaults.risk_max_tokens),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.sentiment_temperature, 0.2);
        assert_eq!(config.risk_max_tokens, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = PipelineConfig::builder()
            .model("gemini-1.5-pro")
            .risk_temperature(0.5)
            .build()
            .unwrap();

        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.risk_temperature, 0.5);
        assert_eq!(config.sentiment_temperature, 0.2);
    }

    #[test]
    fn test_validation_rejects_bad_temperature() {
        let result = PipelineConfig::builder().impact_temperature(1.5).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_zero_budget() {
        let result = PipelineConfig::builder().sentiment_max_tokens(0).build();
        assert!(result.is_err());
    }
}
