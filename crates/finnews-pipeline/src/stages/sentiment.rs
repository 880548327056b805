//! Sentiment stage: classify article sentiment via the LLM

use crate::config::PipelineConfig;
use async_trait::async_trait;
use finnews_core::{AnalysisState, Sentiment, Stage};
use finnews_llm::{GenerationRequest, TextGenerator};
use std::sync::Arc;
use tracing::{info, warn};

fn build_prompt(content: &str) -> String {
    format!(
        r#"Analyze the financial sentiment of the following news article content.

Consider factors such as:
- Positive indicators: growth, profits, expansion, success, positive outlook
- Negative indicators: losses, decline, bankruptcy, failure, negative outlook
- Neutral indicators: routine announcements, mixed signals, uncertainty

Respond with ONLY one word: 'positive', 'negative', or 'neutral'.

Content:
"""
{content}
"""

Sentiment:"#
    )
}

/// Second pipeline stage: writes `sentiment`
///
/// Empty content short-circuits to neutral without calling the generator.
/// Generator failures and unrecognizable responses also resolve to neutral;
/// this stage never propagates an error.
pub struct SentimentStage {
    generator: Arc<dyn TextGenerator>,
    config: Arc<PipelineConfig>,
}

impl SentimentStage {
    /// Create the stage
    pub fn new(generator: Arc<dyn TextGenerator>, config: Arc<PipelineConfig>) -> Self {
        Self { generator, config }
    }
}

#[async_trait]
impl Stage for SentimentStage {
    async fn run(&self, state: AnalysisState) -> AnalysisState {
        let content = state.cleaned_content();

        if content.is_empty() {
            warn!("No cleaned content found for sentiment analysis");
            return state.with_sentiment(Sentiment::Neutral);
        }

        let request = GenerationRequest::builder(&self.config.model)
            .prompt(build_prompt(content))
            .temperature(self.config.sentiment_temperature)
            .max_output_tokens(self.config.sentiment_max_tokens)
            .build();

        let sentiment = match self.generator.generate(request).await {
            Ok(response) => Sentiment::from_response(&response).unwrap_or_else(|| {
                warn!(%response, "Invalid sentiment response, defaulting to neutral");
                Sentiment::Neutral
            }),
            Err(e) => {
                warn!(error = %e, "Sentiment generation failed, defaulting to neutral");
                Sentiment::Neutral
            }
        };

        info!(%sentiment, "Sentiment analysis complete");
        state.with_sentiment(sentiment)
    }

    fn name(&self) -> &'static str {
        "sentiment"
    }
}
